pub mod commands;
pub mod utils;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::auth::JwtVerifier;
use crate::config;
use crate::guard::{AccessGuard, RouteTable};

#[derive(Parser)]
#[command(name = "gatectl")]
#[command(about = "Inspect access decisions and credentials of the market gate")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Evaluate the access guard for a path and cookie set")]
    Check(commands::check::CheckArgs),

    #[command(about = "Verify a credential and show its claims")]
    Inspect(commands::inspect::InspectArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Guard built from the process configuration, as the server would build it.
pub fn configured_guard() -> anyhow::Result<AccessGuard> {
    let security = &config::config().security;
    let verifier = JwtVerifier::new(security.jwt_secret()?, security.jwt_leeway_secs);
    Ok(AccessGuard::new(RouteTable::default(), Arc::new(verifier)))
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let guard = configured_guard()?;

    match cli.command {
        Commands::Check(args) => commands::check::handle(&guard, args, output_format),
        Commands::Inspect(args) => commands::inspect::handle(&guard, args, output_format),
    }
}
