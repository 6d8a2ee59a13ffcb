mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::Cli;
use config::Config;
use trendclaw_skills::SkillsRegistry;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;
    trendclaw_logging::init_logging(&config.logging.level)?;

    let registry = SkillsRegistry::with_defaults(&config.skills);
    let output = commands::dispatch(&registry, cli.command)?;
    println!("{}", output);
    Ok(())
}
