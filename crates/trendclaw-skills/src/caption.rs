//! `generate_caption`: rule-based caption and hashtag generation

use serde_json::{json, Value};
use std::collections::HashSet;
use tracing::{debug, error, warn};
use trendclaw_types::error::Result;
use trendclaw_types::{CaptionRequest, CaptionResult, SkillError, Tool};

use crate::config::CaptionTemplates;
use crate::function::SkillFunction;

/// Registry name of the caption generator
pub const NAME: &str = "generate_caption";

/// Characters stripped from both ends of a word before it becomes a hashtag
const HASHTAG_TRIM: &[char] = &['#', '.', ',', '!', '?', ':', ';'];

/// Caption generation skill driven by [`CaptionTemplates`]
#[derive(Debug, Clone, Default)]
pub struct CaptionGenerator {
    templates: CaptionTemplates,
}

impl CaptionGenerator {
    /// Create a generator using `templates`
    pub fn new(templates: CaptionTemplates) -> Self {
        Self { templates }
    }

    /// Generate a caption for `request`
    pub fn generate(&self, request: &CaptionRequest) -> Result<CaptionResult> {
        request.validate().inspect_err(|e| {
            warn!("Rejected {} request: {}", NAME, e);
        })?;

        debug!(
            "Generating caption: platform={}, tone={}, hashtags={}",
            request.platform, request.tone, request.hashtags
        );

        let prefix = self.templates.tone_prefixes.prefix(request.tone);
        let mut caption = format!("{} {}", prefix, request.context);
        if let Some(description) = request.image_description.as_deref().filter(|d| !d.is_empty()) {
            caption = format!("{caption} ({description})");
        }

        let result = CaptionResult {
            caption,
            hashtags: build_hashtags(
                &request.context,
                usize::from(request.hashtags),
                &self.templates.fallback_hashtag,
            ),
            confidence_score: self.templates.confidence_score,
            reasoning: self.templates.reasoning.clone(),
        };

        result.validate(request.hashtags).map_err(|source| {
            error!("Generated caption failed validation: {}", source);
            SkillError::InternalConsistency { skill: NAME, source }
        })?;

        Ok(result)
    }
}

/// Derive exactly `count` hashtags from the words of `context`.
///
/// Words are trimmed of surrounding punctuation, lower-cased and
/// de-duplicated in first-seen order. When the context runs out of distinct
/// words the list is padded with `fallback`.
pub fn build_hashtags(context: &str, count: usize, fallback: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags: Vec<String> = context
        .split_whitespace()
        .map(|word| word.trim_matches(HASHTAG_TRIM).to_lowercase())
        .filter(|word| !word.is_empty() && seen.insert(word.clone()))
        .take(count)
        .map(|word| format!("#{word}"))
        .collect();

    tags.resize(count, fallback.to_string());
    tags
}

impl SkillFunction for CaptionGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> Tool {
        Tool::function(
            NAME,
            "Write a short social caption for the given context in the requested tone, \
             with hashtags derived from the context.",
            json!({
                "type": "object",
                "properties": {
                    "context": {
                        "type": "string",
                        "minLength": 1,
                        "description": "What the post is about"
                    },
                    "image_description": {
                        "type": ["string", "null"],
                        "description": "Optional description of the attached image"
                    },
                    "platform": {
                        "type": "string",
                        "enum": ["twitter", "instagram", "tiktok"]
                    },
                    "tone": {
                        "type": "string",
                        "enum": ["witty", "professional", "casual"]
                    },
                    "hashtags": {
                        "type": "integer",
                        "minimum": 0,
                        "maximum": 10,
                        "default": 3,
                        "description": "Number of hashtags to return"
                    }
                },
                "required": ["context", "platform", "tone"]
            }),
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let request = CaptionRequest::from_value(&args).inspect_err(|e| {
            warn!("Rejected {} arguments: {}", NAME, e);
        })?;
        let result = self.generate(&request)?;
        Ok(serde_json::to_value(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendclaw_types::{Platform, Tone};

    #[test]
    fn test_hashtags_strip_punctuation_and_dedupe() {
        let tags = build_hashtags("Wow! wow, #AI is here: AI.", 4, "#trend");
        assert_eq!(tags, vec!["#wow", "#ai", "#is", "#here"]);
    }

    #[test]
    fn test_hashtags_pad_with_fallback() {
        let tags = build_hashtags("hello hello", 3, "#trend");
        assert_eq!(tags, vec!["#hello", "#trend", "#trend"]);
    }

    #[test]
    fn test_hashtags_skip_pure_punctuation() {
        let tags = build_hashtags("... !!! ok", 2, "#x");
        assert_eq!(tags, vec!["#ok", "#x"]);
    }

    #[test]
    fn test_zero_hashtags() {
        assert!(build_hashtags("plenty of words here", 0, "#trend").is_empty());
    }

    #[test]
    fn test_image_description_is_appended() {
        let request = CaptionRequest::new("Launch day", Platform::Tiktok, Tone::Professional)
            .with_image_description("team photo");
        let result = CaptionGenerator::default().generate(&request).unwrap();
        assert_eq!(result.caption, "Insight: Launch day (team photo)");
    }

    #[test]
    fn test_empty_image_description_is_ignored() {
        let request = CaptionRequest::new("Launch day", Platform::Tiktok, Tone::Casual)
            .with_image_description("");
        let result = CaptionGenerator::default().generate(&request).unwrap();
        assert_eq!(result.caption, "Vibes: Launch day");
    }

    #[test]
    fn test_out_of_range_confidence_is_caught() {
        let templates = CaptionTemplates {
            confidence_score: 1.5,
            ..CaptionTemplates::default()
        };
        let request = CaptionRequest::new("hi", Platform::Twitter, Tone::Witty);
        let err = CaptionGenerator::new(templates).generate(&request).unwrap_err();
        assert!(matches!(err, SkillError::InternalConsistency { skill: NAME, .. }));
    }
}
