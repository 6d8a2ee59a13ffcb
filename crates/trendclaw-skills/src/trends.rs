//! `fetch_trends`: synthesize trend records for a niche from the seed catalog

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use trendclaw_types::error::Result;
use trendclaw_types::{SkillError, Tool, TrendFetchRequest, TrendFetchResult, TrendRecord};
use uuid::Uuid;

use crate::config::TrendCatalog;
use crate::function::SkillFunction;

/// Registry name of the trend fetcher
pub const NAME: &str = "fetch_trends";

/// Lowest score any synthesized trend receives
const SCORE_FLOOR: f64 = 0.1;
const BASE_VOLUME: u64 = 1000;
const VOLUME_STEP: u64 = 250;

/// Trend fetch skill backed by a static [`TrendCatalog`]
#[derive(Debug, Clone, Default)]
pub struct TrendFetcher {
    catalog: TrendCatalog,
}

impl TrendFetcher {
    /// Create a fetcher over `catalog`
    pub fn new(catalog: TrendCatalog) -> Self {
        Self { catalog }
    }

    /// Fetch up to `request.limit` trends for `request.niche`.
    ///
    /// Every synthesized record is re-validated before it is returned; a
    /// failure there means the catalog disagrees with the trend schema and
    /// surfaces as [`SkillError::InternalConsistency`].
    pub fn fetch(&self, request: &TrendFetchRequest) -> Result<TrendFetchResult> {
        request.validate().inspect_err(|e| {
            warn!("Rejected {} request: {}", NAME, e);
        })?;

        debug!(
            "Fetching trends: niche={}, timeframe={}, limit={}",
            request.niche, request.timeframe, request.limit
        );

        let now = Utc::now();
        let trends: Vec<TrendRecord> = self
            .catalog
            .topics_for(&request.niche)
            .iter()
            .take(request.limit)
            .enumerate()
            .map(|(idx, topic)| self.synthesize(&request.niche, topic, idx + 1, now))
            .collect();

        for trend in &trends {
            trend.validate().map_err(|source| {
                error!("Synthesized trend '{}' failed validation: {}", trend.topic, source);
                SkillError::InternalConsistency { skill: NAME, source }
            })?;
        }

        info!("Fetched {} trend(s) for niche '{}'", trends.len(), request.niche);

        Ok(TrendFetchResult {
            trends,
            fetched_at: Utc::now(),
        })
    }

    /// Build the record for `topic` at 1-based `position`
    fn synthesize(
        &self,
        niche: &str,
        topic: &str,
        position: usize,
        now: DateTime<Utc>,
    ) -> TrendRecord {
        let first_word = topic.split_whitespace().next().unwrap_or(topic);

        TrendRecord {
            trend_id: Uuid::new_v4(),
            topic: topic.to_string(),
            niche: niche.to_string(),
            score: score_at(position),
            volume: volume_at(position),
            sources: self.catalog.sources.clone(),
            timestamp: now,
            relevant_keywords: vec![
                niche.to_string(),
                self.catalog.keyword_token.clone(),
                first_word.to_string(),
            ],
        }
    }
}

/// `max(0.1, 1 - position * 0.1)`, computed in tenths so 0.7 is exactly 0.7
fn score_at(position: usize) -> f64 {
    let tenths = 10 - position.min(10);
    (tenths as f64 / 10.0).max(SCORE_FLOOR)
}

/// `1000 + position * 250`
fn volume_at(position: usize) -> u64 {
    BASE_VOLUME.saturating_add((position as u64).saturating_mul(VOLUME_STEP))
}

impl SkillFunction for TrendFetcher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> Tool {
        Tool::function(
            NAME,
            "Fetch trending topics for a content niche. Returns scored trend records \
             with volume, sources and keywords, strongest first.",
            json!({
                "type": "object",
                "properties": {
                    "niche": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Content niche, e.g. fashion, crypto, gaming"
                    },
                    "timeframe": {
                        "type": "string",
                        "minLength": 1,
                        "description": "Lookback window",
                        "default": "24h"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Maximum number of trends to return",
                        "default": 10
                    }
                },
                "required": ["niche"]
            }),
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let request = TrendFetchRequest::from_value(&args).inspect_err(|e| {
            warn!("Rejected {} arguments: {}", NAME, e);
        })?;
        let result = self.fetch(&request)?;
        Ok(serde_json::to_value(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula() {
        assert_eq!(score_at(1), 0.9);
        assert_eq!(score_at(2), 0.8);
        assert_eq!(score_at(3), 0.7);
        assert_eq!(score_at(9), 0.1);
        assert_eq!(score_at(10), 0.1);
        assert_eq!(score_at(25), 0.1);
    }

    #[test]
    fn test_volume_formula() {
        assert_eq!(volume_at(1), 1250);
        assert_eq!(volume_at(2), 1500);
        assert_eq!(volume_at(3), 1750);
    }

    #[test]
    fn test_keywords_use_first_word_of_topic() {
        let fetcher = TrendFetcher::default();
        let trend = fetcher.synthesize("fashion", "Virtual Try-On", 3, Utc::now());
        assert_eq!(trend.relevant_keywords, vec!["fashion", "trend", "Virtual"]);
    }

    #[test]
    fn test_limit_truncates_in_order() {
        let fetcher = TrendFetcher::default();
        let result = fetcher
            .fetch(&TrendFetchRequest::new("gaming").with_limit(2))
            .unwrap();
        let topics: Vec<_> = result.trends.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(topics, vec!["Co-op Roguelikes", "Indie Pixel Revival"]);
    }

    #[test]
    fn test_broken_catalog_is_an_internal_consistency_error() {
        let catalog = TrendCatalog {
            sources: Vec::new(),
            ..TrendCatalog::default()
        };
        let err = TrendFetcher::new(catalog)
            .fetch(&TrendFetchRequest::new("fashion"))
            .unwrap_err();

        match err {
            SkillError::InternalConsistency { skill, source } => {
                assert_eq!(skill, NAME);
                assert!(source.mentions("sources"));
            }
            other => panic!("expected internal consistency error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_request_fails_before_synthesis() {
        let err = TrendFetcher::default()
            .fetch(&TrendFetchRequest::new(""))
            .unwrap_err();
        assert!(err.violations().is_some_and(|v| v.mentions("niche")));
    }
}
