//! CLI command definitions and parsing.

use clap::{Parser, Subcommand};

/// msgvault: multi-account Telegram capture with a search API.
#[derive(Debug, Parser)]
#[command(name = "msgvault", version, about)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to execute. Defaults to `run`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the ingestion pipeline and the search API server.
    Run,

    /// Validate configuration and print the accounts that would be used.
    CheckConfig,
}

impl Cli {
    /// The effective command, with `run` as the default.
    pub fn command(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Run)
    }
}
