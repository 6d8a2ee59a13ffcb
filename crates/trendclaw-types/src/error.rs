//! Error types shared by every skill

use thiserror::Error;

use crate::schema::ValidationError;

/// Skill invocation errors
#[derive(Debug, Error)]
pub enum SkillError {
    /// Input did not satisfy the skill's schema
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// A required field was absent; checked before schema validation
    #[error("{field} is required")]
    Precondition {
        /// Dotted path of the missing field
        field: &'static str,
    },

    /// A skill produced output that fails its own output schema
    #[error("skill '{skill}' produced output violating its contract: {source}")]
    InternalConsistency {
        /// Skill name
        skill: &'static str,
        /// The violations found in the output
        source: ValidationError,
    },

    /// No skill registered under the requested name
    #[error("Skill '{0}' not found")]
    UnknownSkill(String),

    /// Result could not be encoded as JSON
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SkillError {
    /// The validation report behind this error, if it carries one
    pub fn violations(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(report) | Self::InternalConsistency { source: report, .. } => {
                Some(report)
            }
            _ => None,
        }
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, SkillError>;
