//! Caption generation contract

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::platform::{ClosedSet, Platform};
use crate::schema::{FieldReader, ValidationError, ViolationKind, Violations};

/// Hashtags requested when the caller does not say otherwise
pub const DEFAULT_HASHTAG_COUNT: u8 = 3;
/// Upper bound on requested hashtags
pub const MAX_HASHTAG_COUNT: u8 = 10;

/// Voice a caption is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Witty,
    Professional,
    Casual,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Witty => "witty",
            Self::Professional => "professional",
            Self::Casual => "casual",
        }
    }
}

impl ClosedSet for Tone {
    const VARIANTS: &'static [&'static str] = &["witty", "professional", "casual"];
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "witty" => Ok(Self::Witty),
            "professional" => Ok(Self::Professional),
            "casual" => Ok(Self::Casual),
            other => Err(format!("unknown tone '{other}'")),
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input contract for caption generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionRequest {
    pub context: String,
    pub image_description: Option<String>,
    pub platform: Platform,
    pub tone: Tone,
    /// Number of hashtags to produce, `0..=10`
    pub hashtags: u8,
}

impl CaptionRequest {
    pub fn new(context: impl Into<String>, platform: Platform, tone: Tone) -> Self {
        Self {
            context: context.into(),
            image_description: None,
            platform,
            tone,
            hashtags: DEFAULT_HASHTAG_COUNT,
        }
    }

    pub fn with_image_description(mut self, description: impl Into<String>) -> Self {
        self.image_description = Some(description.into());
        self
    }

    pub fn with_hashtags(mut self, count: u8) -> Self {
        self.hashtags = count;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut v = Violations::new();
        v.check_text("context", &self.context);
        v.check(self.hashtags <= MAX_HASHTAG_COUNT, "hashtags", || {
            ViolationKind::OutOfRange {
                constraint: format!("0 <= x <= {MAX_HASHTAG_COUNT}"),
            }
        });
        v.into_result()
    }

    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(value);

        let context = reader.required_text("context");
        let image_description = reader.optional_text("image_description");
        let platform = reader.variant::<Platform>("platform");
        let tone = reader.variant::<Tone>("tone");
        let hashtags = reader.integer_in(
            "hashtags",
            Some(u64::from(DEFAULT_HASHTAG_COUNT)),
            0,
            u64::from(MAX_HASHTAG_COUNT),
        );

        match (context, platform, tone, hashtags.and_then(|n| u8::try_from(n).ok())) {
            (Some(context), Some(platform), Some(tone), Some(hashtags)) if reader.is_clean() => {
                Ok(Self {
                    context,
                    image_description,
                    platform,
                    tone,
                    hashtags,
                })
            }
            _ => Err(reader.into_error()),
        }
    }
}

/// Output contract for caption generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionResult {
    pub caption: String,
    pub hashtags: Vec<String>,
    pub confidence_score: f64,
    pub reasoning: String,
}

impl CaptionResult {
    /// Check the result against the request it was generated for
    pub fn validate(&self, requested_hashtags: u8) -> Result<(), ValidationError> {
        let mut v = Violations::new();
        v.check_text("caption", &self.caption);
        v.check(
            self.hashtags.len() == usize::from(requested_hashtags),
            "hashtags",
            || ViolationKind::OutOfRange {
                constraint: format!("len == {requested_hashtags}"),
            },
        );
        v.check_f64_range("confidence_score", self.confidence_score, 0.0, 1.0);
        v.into_result()
    }
}
