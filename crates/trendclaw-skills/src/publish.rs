//! `publish_post`: stub publisher
//!
//! No platform API is called. The result is a placeholder with a
//! deterministic post id and must not be read as a real confirmation.

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, warn};
use trendclaw_types::error::Result;
use trendclaw_types::{PlatformResponse, PublishRequest, PublishResult, Tool};

use crate::function::SkillFunction;

/// Registry name of the publisher
pub const NAME: &str = "publish_post";

/// Publish skill that echoes the request back as a successful stub post
#[derive(Debug, Clone, Copy, Default)]
pub struct PostPublisher;

impl PostPublisher {
    /// Create the stub publisher
    pub fn new() -> Self {
        Self
    }

    /// "Publish" `request`, returning a stub result stamped with the current time
    pub fn publish(&self, request: &PublishRequest) -> PublishResult {
        if let Some(at) = request.schedule_time {
            info!("Stub publisher ignores schedule_time {}; publishing immediately", at);
        }

        info!(
            "Stub publish to {} ({} chars, ai_disclosure={})",
            request.platform,
            request.content.text.chars().count(),
            request.ai_disclosure
        );

        PublishResult {
            success: true,
            post_id: format!("{}-stub", request.platform),
            published_at: Utc::now(),
            platform_response: PlatformResponse {
                ai_disclosure: request.ai_disclosure,
            },
        }
    }
}

impl SkillFunction for PostPublisher {
    fn name(&self) -> &'static str {
        NAME
    }

    fn definition(&self) -> Tool {
        Tool::function(
            NAME,
            "Publish a post to a social platform. Stub: validates the request and \
             returns a placeholder post id without contacting the platform.",
            json!({
                "type": "object",
                "properties": {
                    "platform": {
                        "type": "string",
                        "enum": ["twitter", "instagram", "tiktok"]
                    },
                    "content": {
                        "type": "object",
                        "description": "Post body containing text/media",
                        "properties": {
                            "text": { "type": "string" }
                        },
                        "required": ["text"]
                    },
                    "schedule_time": {
                        "type": ["string", "null"],
                        "format": "date-time"
                    },
                    "ai_disclosure": {
                        "type": "boolean",
                        "default": true
                    }
                },
                "required": ["platform", "content"]
            }),
        )
    }

    fn execute(&self, args: Value) -> Result<Value> {
        let request = PublishRequest::from_value(&args).inspect_err(|e| {
            warn!("Rejected {} arguments: {}", NAME, e);
        })?;
        Ok(serde_json::to_value(self.publish(&request))?)
    }
}
