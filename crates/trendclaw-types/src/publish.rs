//! Post publishing contract

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SkillError;
use crate::platform::Platform;
use crate::schema::FieldReader;

/// Body of a post. `text` is mandatory; anything else (media, links) rides along untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostContent {
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PostContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            extra: Map::new(),
        }
    }
}

/// Input contract for publishing a post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishRequest {
    pub platform: Platform,
    pub content: PostContent,
    pub schedule_time: Option<DateTime<Utc>>,
    pub ai_disclosure: bool,
}

impl PublishRequest {
    pub fn new(platform: Platform, content: PostContent) -> Self {
        Self {
            platform,
            content,
            schedule_time: None,
            ai_disclosure: true,
        }
    }

    pub fn with_schedule_time(mut self, at: DateTime<Utc>) -> Self {
        self.schedule_time = Some(at);
        self
    }

    pub fn with_ai_disclosure(mut self, disclose: bool) -> Self {
        self.ai_disclosure = disclose;
        self
    }

    /// Parse untyped publish arguments.
    ///
    /// `platform` and `content.text` are checked before the schema so that their
    /// absence produces a targeted precondition error instead of a generic
    /// validation report. A `text` key holding `null` counts as absent; a
    /// present but non-string `text` is a schema violation.
    ///
    /// Keys outside the contract are ignored.
    pub fn from_value(value: &Value) -> Result<Self, SkillError> {
        let platform_given = value
            .get("platform")
            .is_some_and(|p| !p.is_null() && p.as_str() != Some(""));
        if !platform_given {
            return Err(SkillError::Precondition { field: "platform" });
        }

        let content = value.get("content").and_then(Value::as_object);
        if !content.is_some_and(|c| c.get("text").is_some_and(|t| !t.is_null())) {
            return Err(SkillError::Precondition {
                field: "content.text",
            });
        }

        let mut reader = FieldReader::new(value);
        let platform = reader.variant::<Platform>("platform");
        let schedule_time = reader.optional_timestamp("schedule_time");
        let ai_disclosure = reader.bool_or("ai_disclosure", true);

        let mut body = FieldReader::nested(&value["content"], "content");
        let text = body.optional_text("text");
        reader.absorb(body);

        match (platform, content, text, schedule_time, ai_disclosure) {
            (Some(platform), Some(content), Some(text), Some(schedule_time), Some(ai_disclosure))
                if reader.is_clean() =>
            {
                let mut extra = content.clone();
                extra.remove("text");
                Ok(Self {
                    platform,
                    content: PostContent { text, extra },
                    schedule_time,
                    ai_disclosure,
                })
            }
            _ => Err(reader.into_error().into()),
        }
    }
}

/// What the platform reported back about the post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformResponse {
    pub ai_disclosure: bool,
}

/// Output contract for publishing a post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishResult {
    pub success: bool,
    pub post_id: String,
    pub published_at: DateTime<Utc>,
    pub platform_response: PlatformResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_platform_is_a_precondition() {
        let err = PublishRequest::from_value(&json!({ "content": { "text": "Hello world" } }))
            .unwrap_err();
        assert!(matches!(err, SkillError::Precondition { field: "platform" }));
        assert!(err.to_string().contains("platform"));
    }

    #[test]
    fn test_empty_platform_counts_as_missing() {
        let err = PublishRequest::from_value(&json!({
            "platform": "",
            "content": { "text": "hi" }
        }))
        .unwrap_err();
        assert!(matches!(err, SkillError::Precondition { field: "platform" }));
    }

    #[test]
    fn test_missing_text_is_a_precondition() {
        let err = PublishRequest::from_value(&json!({ "platform": "twitter", "content": {} }))
            .unwrap_err();
        assert!(matches!(err, SkillError::Precondition { field: "content.text" }));
        assert!(err.to_string().contains("content.text"));

        let err = PublishRequest::from_value(&json!({ "platform": "twitter" })).unwrap_err();
        assert!(matches!(err, SkillError::Precondition { field: "content.text" }));
    }

    #[test]
    fn test_schema_violations_after_preconditions() {
        let err = PublishRequest::from_value(&json!({
            "platform": "myspace",
            "content": { "text": 42 },
            "ai_disclosure": "yes"
        }))
        .unwrap_err();

        let SkillError::Validation(report) = err else {
            panic!("expected a validation error");
        };
        assert!(report.mentions("platform"));
        assert!(report.mentions("content.text"));
        assert!(report.mentions("ai_disclosure"));
    }

    #[test]
    fn test_extra_content_is_preserved() {
        let request = PublishRequest::from_value(&json!({
            "platform": "instagram",
            "content": { "text": "hi", "media_url": "https://example.com/a.png" },
            "schedule_time": "2026-03-01T09:00:00Z",
            "ai_disclosure": false
        }))
        .unwrap();

        assert_eq!(request.platform, Platform::Instagram);
        assert_eq!(request.content.text, "hi");
        assert_eq!(request.content.extra.get("media_url"), Some(&json!("https://example.com/a.png")));
        assert!(request.schedule_time.is_some());
        assert!(!request.ai_disclosure);
    }

    #[test]
    fn test_schedule_time_accepts_naive_iso8601() {
        let request = PublishRequest::from_value(&json!({
            "platform": "twitter",
            "content": { "text": "hi" },
            "schedule_time": "2026-03-01T09:00:00"
        }))
        .unwrap();

        let at = DateTime::parse_from_rfc3339("2026-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            request,
            PublishRequest::new(Platform::Twitter, PostContent::text("hi")).with_schedule_time(at)
        );
    }

    #[test]
    fn test_malformed_schedule_time_is_rejected() {
        let err = PublishRequest::from_value(&json!({
            "platform": "twitter",
            "content": { "text": "hi" },
            "schedule_time": "tomorrow morning"
        }))
        .unwrap_err();

        let report = err.violations().expect("validation error");
        assert_eq!(report.violations().len(), 1);
        assert!(report.mentions("schedule_time"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let request = PublishRequest::from_value(&json!({
            "platform": "twitter",
            "content": { "text": "hi" },
            "bogus": 1
        }))
        .unwrap();
        assert_eq!(request, PublishRequest::new(Platform::Twitter, PostContent::text("hi")));
    }

    #[test]
    fn test_null_text_counts_as_missing() {
        let err = PublishRequest::from_value(&json!({
            "platform": "twitter",
            "content": { "text": null }
        }))
        .unwrap_err();
        assert!(matches!(err, SkillError::Precondition { field: "content.text" }));
    }
}
