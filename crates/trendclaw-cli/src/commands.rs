use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;
use trendclaw_skills::SkillsRegistry;
use trendclaw_types::SkillError;

/// Run TrendClaw content skills from the command line
#[derive(Debug, Parser)]
#[command(name = "trendclaw", version, about)]
pub struct Cli {
    /// Extra config file, layered over ~/.trendclaw and ./trendclaw.toml
    #[arg(long, global = true, env = "TRENDCLAW_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List registered skills with their descriptions
    List,
    /// Print the tool definition of a skill as JSON
    Schema {
        /// Skill name, e.g. fetch_trends
        skill: String,
    },
    /// Run a skill with JSON arguments and print its result
    Run {
        /// Skill name, e.g. generate_caption
        skill: String,
        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        args: String,
    },
}

/// Execute `command` against `registry`, returning the text to print
pub fn dispatch(registry: &SkillsRegistry, command: Command) -> Result<String> {
    match command {
        Command::List => Ok(registry.generate_summary()),
        Command::Schema { skill } => {
            let definition = registry
                .get(&skill)
                .map(|s| s.definition())
                .ok_or(SkillError::UnknownSkill(skill))?;
            Ok(serde_json::to_string_pretty(&definition)?)
        }
        Command::Run { skill, args } => {
            let args: Value =
                serde_json::from_str(&args).context("Arguments must be valid JSON")?;
            debug!("Running '{}' with {}", skill, args);
            let output = registry.execute(&skill, args)?;
            Ok(serde_json::to_string_pretty(&output)?)
        }
    }
}
