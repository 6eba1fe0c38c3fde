//! schoolctl CLI - run and query the school administration API
//!
//! - `serve` starts the HTTP API (SQLite + JWT auth)
//! - `login`, `me`, `summary`, `list` call a running server
//! - `config` inspects the layered configuration

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "schoolctl",
    author,
    version,
    about = "School administration API server and client",
    long_about = "Serve a JSON API for students, teachers, courses, grades and attendance \
                  backed by SQLite, or query a running server from the terminal."
)]
struct Cli {
    /// Debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Inspect configuration (show, path)
    Config(config::ConfigArgs),
    /// Log in and print a bearer token
    Login(commands::api::LoginArgs),
    /// Show the profile behind the current token
    Me(commands::api::RemoteArgs),
    /// Dashboard totals, averages per course and attendance trend
    Summary(commands::api::RemoteArgs),
    /// List a collection (students, teachers, courses, grades, attendance)
    List(commands::api::ListArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory feeds the same variables as the real environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Config(args) => config::run_config(args)?,
        Commands::Login(args) => commands::run_login(args).await?,
        Commands::Me(args) => commands::run_me(args).await?,
        Commands::Summary(args) => commands::run_summary(args).await?,
        Commands::List(args) => commands::run_list(args).await?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
