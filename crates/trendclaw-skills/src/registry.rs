//! Skills registry for dispatching calls by name
//!
//! Holds every registered skill behind the [`SkillFunction`] trait so callers
//! can list definitions and invoke skills with untyped JSON arguments.

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use trendclaw_types::error::Result;
use trendclaw_types::{SkillError, Tool};

use crate::caption::CaptionGenerator;
use crate::config::SkillsConfig;
use crate::function::SkillFunction;
use crate::publish::PostPublisher;
use crate::trends::TrendFetcher;

/// Skills registry managing all available skills
pub struct SkillsRegistry {
    /// Registered skills keyed by name
    skills: HashMap<String, Box<dyn SkillFunction>>,
}

impl SkillsRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            skills: HashMap::new(),
        }
    }

    /// Registry holding the three built-in skills configured from `config`
    pub fn with_defaults(config: &SkillsConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TrendFetcher::new(config.trends.clone())));
        registry.register(Box::new(CaptionGenerator::new(config.caption.clone())));
        registry.register(Box::new(PostPublisher::new()));
        info!("Registered {} skills", registry.len());
        registry
    }

    /// Register a skill, replacing any existing skill with the same name
    pub fn register(&mut self, skill: Box<dyn SkillFunction>) {
        let name = skill.name().to_string();
        if self.skills.insert(name.clone(), skill).is_some() {
            warn!("Skill '{}' was already registered; replaced", name);
        } else {
            debug!("Registered skill: {}", name);
        }
    }

    /// Get a skill by name
    pub fn get(&self, name: &str) -> Option<&dyn SkillFunction> {
        self.skills.get(name).map(|skill| &**skill)
    }

    /// Run the named skill with JSON arguments
    pub fn execute(&self, name: &str, args: Value) -> Result<Value> {
        let skill = self
            .get(name)
            .ok_or_else(|| SkillError::UnknownSkill(name.to_string()))?;

        debug!("Executing skill '{}'", name);
        skill.execute(args)
    }

    /// Definitions of every registered skill, sorted by name
    pub fn definitions(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self.skills.values().map(|s| s.definition()).collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
    }

    /// All skill names, sorted
    pub fn skill_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.skills.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get number of skills
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// One line per skill, sorted by name.
    /// Format:
    /// - skill-name: Description of what this skill does
    pub fn generate_summary(&self) -> String {
        if self.skills.is_empty() {
            return "No skills available".to_string();
        }

        self.definitions()
            .iter()
            .map(|tool| format!("- {}: {}", tool.function.name, tool.function.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for SkillsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
