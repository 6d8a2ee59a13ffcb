//! Trend records and the fetch contract

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::schema::{FieldReader, ValidationError, ViolationKind, Violations};

/// Timeframe used when the caller does not supply one
pub const DEFAULT_TIMEFRAME: &str = "24h";
/// Maximum number of trends returned when the caller does not supply a limit
pub const DEFAULT_LIMIT: usize = 10;

/// A single trending topic within a niche
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRecord {
    pub trend_id: Uuid,
    pub topic: String,
    pub niche: String,
    /// Relative strength in `[0, 1]`
    pub score: f64,
    pub volume: u64,
    pub sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub relevant_keywords: Vec<String>,
}

impl TrendRecord {
    /// Build a typed record from an untyped one, reporting every violation
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(value);

        let trend_id = reader.uuid("trend_id");
        let topic = reader.required_text("topic");
        let niche = reader.required_text("niche");
        let score = reader.number_in("score", 0.0, 1.0);
        let volume = reader.integer_in("volume", None, 0, u64::MAX);
        let sources = reader.non_empty_list("sources");
        let timestamp = reader.timestamp("timestamp");
        let relevant_keywords = reader.non_empty_list("relevant_keywords");

        match (
            trend_id,
            topic,
            niche,
            score,
            volume,
            sources,
            timestamp,
            relevant_keywords,
        ) {
            (
                Some(trend_id),
                Some(topic),
                Some(niche),
                Some(score),
                Some(volume),
                Some(sources),
                Some(timestamp),
                Some(relevant_keywords),
            ) if reader.is_clean() => Ok(Self {
                trend_id,
                topic,
                niche,
                score,
                volume,
                sources,
                timestamp,
                relevant_keywords,
            }),
            _ => Err(reader.into_error()),
        }
    }

    /// Re-check the invariants of an already typed record
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Violations::new();
        v.check_text("topic", &self.topic);
        v.check_text("niche", &self.niche);
        v.check_f64_range("score", self.score, 0.0, 1.0);
        v.check_list("sources", &self.sources);
        v.check_list("relevant_keywords", &self.relevant_keywords);
        v.into_result()
    }
}

/// Input contract for fetching trends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendFetchRequest {
    pub niche: String,
    pub timeframe: String,
    pub limit: usize,
}

impl TrendFetchRequest {
    pub fn new(niche: impl Into<String>) -> Self {
        Self {
            niche: niche.into(),
            timeframe: DEFAULT_TIMEFRAME.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = timeframe.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Violations::new();
        v.check_text("niche", &self.niche);
        v.check_text("timeframe", &self.timeframe);
        v.check(self.limit >= 1, "limit", || ViolationKind::OutOfRange {
            constraint: "x >= 1".to_string(),
        });
        v.into_result()
    }

    /// Parse and validate untyped fetch arguments, applying defaults
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(value);

        let niche = reader.required_text("niche");
        let timeframe = reader.text_or("timeframe", DEFAULT_TIMEFRAME);
        let limit = reader.integer_in("limit", Some(DEFAULT_LIMIT as u64), 1, u64::MAX);

        match (niche, timeframe, limit) {
            (Some(niche), Some(timeframe), Some(limit)) if reader.is_clean() => Ok(Self {
                niche,
                timeframe,
                limit: usize::try_from(limit).unwrap_or(usize::MAX),
            }),
            _ => Err(reader.into_error()),
        }
    }
}

/// Output of a trend fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendFetchResult {
    pub trends: Vec<TrendRecord>,
    pub fetched_at: DateTime<Utc>,
}
