//! Root CLI structure for emitter-rs

use clap::{Parser, Subcommand};

use crate::commands::{init::InitArgs, simulate::SimulateArgs, validate::ValidateArgs};

#[derive(Parser)]
#[command(name = "emitter-rs")]
#[command(about = "Run, validate and author particle emitter settings", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an emitter headlessly and report what it did
    Simulate(SimulateArgs),

    /// Check a settings file and show the runtime configuration
    Validate(ValidateArgs),

    /// Write a settings file with default values
    Init(InitArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
