//! CLI module for Vijnana
//!
//! Subcommands:
//! - `serve`: run the HTTP server
//! - `create-user`: provision an account with any role

pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Vijnana - department resources and question paper generation
#[derive(Parser)]
#[command(name = "vijnana")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Create a user account, including HOD and administrator accounts
    CreateUser(user::CreateUserArgs),
}

/// Loads `.env` and the layered configuration, then starts logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
