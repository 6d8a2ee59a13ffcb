//! The callable surface every skill exposes

use serde_json::Value;
use trendclaw_types::error::Result;
use trendclaw_types::Tool;

/// A skill callable with untyped JSON arguments.
///
/// `execute` must validate `args` against the schema published in
/// `definition` before doing any work.
pub trait SkillFunction: Send + Sync {
    /// Registry key, e.g. `fetch_trends`
    fn name(&self) -> &'static str;

    /// Function definition carrying the JSON Schema of the input contract
    fn definition(&self) -> Tool;

    /// Validate `args`, run the skill, and return its JSON result
    fn execute(&self, args: Value) -> Result<Value>;
}
