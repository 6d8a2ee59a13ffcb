//! `TrendClaw` Skills
//!
//! Content skills gated by schema validation. Each skill follows the same
//! contract:
//!
//! 1. Validate the input record, failing fast with every violation found
//! 2. Run a deterministic transform over the validated fields only
//! 3. Re-validate the output against its schema before returning it
//!
//! ## Skills
//!
//! - `fetch_trends`: scored trend records for a niche, from a seed catalog
//! - `generate_caption`: tone-prefixed caption plus hashtags from the context
//! - `publish_post`: stub publisher returning a placeholder post id
//!
//! Lookup tables live in [`SkillsConfig`] and are handed to each skill at
//! construction, so skills hold no global state and are safe to share
//! across threads.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod caption;
pub mod config;
pub mod function;
pub mod publish;
pub mod registry;
pub mod trends;

pub use caption::CaptionGenerator;
pub use config::{CaptionTemplates, SkillsConfig, TonePrefixes, TrendCatalog};
pub use function::SkillFunction;
pub use publish::PostPublisher;
pub use registry::SkillsRegistry;
pub use trends::TrendFetcher;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        CaptionGenerator, PostPublisher, SkillFunction, SkillsConfig, SkillsRegistry, TrendFetcher,
    };
    pub use trendclaw_types::{
        CaptionRequest, Platform, PostContent, PublishRequest, SkillError, Tone,
        TrendFetchRequest,
    };
}
