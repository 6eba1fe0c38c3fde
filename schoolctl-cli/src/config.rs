use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schoolctl_core::SchoolConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration (file + environment) as TOML
    Show,
    /// Show config file path
    Path,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_show() -> Result<()> {
    let config = SchoolConfig::load().context("Failed to load configuration")?;
    println!("{}", render(config)?);
    Ok(())
}

/// TOML with secrets masked
fn render(mut config: SchoolConfig) -> Result<String> {
    if !config.auth.uses_dev_secret() {
        config.auth.jwt_secret = "********".to_string();
    }
    if config.auth.seed_admin_password.is_some() {
        config.auth.seed_admin_password = Some("********".to_string());
    }
    toml::to_string_pretty(&config).context("Failed to serialize config to TOML")
}

fn run_path() -> Result<()> {
    println!("{}", SchoolConfig::config_path().display());
    Ok(())
}
