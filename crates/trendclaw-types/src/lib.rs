//! TrendClaw Types - Core records and contracts for the TrendClaw skills
//!
//! This crate defines the data records every skill accepts and returns, the
//! schema layer that turns untyped JSON into those records, and the error
//! taxonomy shared by all skills.

pub mod caption;
pub mod error;
pub mod platform;
pub mod publish;
pub mod schema;
pub mod tool;
pub mod trend;

pub use caption::{CaptionRequest, CaptionResult, Tone};
pub use error::SkillError;
pub use platform::{ClosedSet, Platform};
pub use publish::{PlatformResponse, PostContent, PublishRequest, PublishResult};
pub use schema::{FieldReader, ValidationError, Violation, ViolationKind, Violations};
pub use tool::{FunctionDef, Tool};
pub use trend::{TrendFetchRequest, TrendFetchResult, TrendRecord};
