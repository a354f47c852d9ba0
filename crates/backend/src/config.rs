use clap::{Args, Parser, Subcommand};

use crate::auth::SessionConfig;

#[derive(Debug, Parser)]
#[command(name = "jokes-backend")]
#[command(about = "Server-rendered joke sharing site")]
pub struct Cli {
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create the demo user and a handful of jokes
    Seed,
}

#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Postgres connection string. Without it the server keeps everything
    /// in memory and loses it on exit.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Connect to Postgres over TLS using the webpki root certificates
    #[arg(long, env = "DATABASE_TLS")]
    pub database_tls: bool,

    /// Secret the session signing key is derived from (at least 32 bytes)
    #[arg(long, env = "SESSION_SECRET", hide_env_values = true)]
    pub session_secret: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// `production` turns on the Secure cookie attribute
    #[arg(long = "env", env = "RUST_ENV", default_value = "development")]
    pub environment: String,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.is_production())
    }
}
