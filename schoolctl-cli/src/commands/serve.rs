//! HTTP server command
//!
//! Runs the school API with configuration from file, environment and flags.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use schoolctl_core::SchoolConfig;
use schoolctl_server::run_server;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:4000, or HOST/PORT)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// SQLite database file (default: ./school.sqlite, or DB_PATH)
    #[arg(long, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Only allow this cross-origin source (default: any, or CORS_ORIGIN)
    #[arg(long, value_name = "ORIGIN")]
    pub cors_origin: Option<String>,
}

impl ServeArgs {
    /// Flags win over file and environment
    fn apply(self, config: &mut SchoolConfig) {
        if let Some(bind) = self.bind {
            config.server.host = bind.ip().to_string();
            config.server.port = bind.port();
        }
        if let Some(path) = self.db_path {
            config.database.path = path;
        }
        if let Some(origin) = self.cors_origin {
            config.server.cors_origin = Some(origin);
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = SchoolConfig::load().context("Failed to load configuration")?;
    args.apply(&mut config);

    tracing::info!(
        "Starting schoolctl server on {}:{}",
        config.server.host,
        config.server.port
    );

    // Run server (blocks until shutdown)
    run_server(&config).await.context("Server error")?;

    Ok(())
}
