//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Aegis using clap.
//!
//! Exit codes: 0 success, 1 verification failed or authentication denied,
//! 2 configuration error, 3 invalid input, 5 fatal error.

pub mod commands;

use clap::{Parser, Subcommand};

/// Aegis - privacy-preserving record transformation with a signed audit ledger
#[derive(Parser, Debug)]
#[command(name = "aegis")]
#[command(version, about, long_about = None)]
#[command(author = "Aegis Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "aegis.toml", env = "AEGIS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "AEGIS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Release the k-anonymous subset of a records file
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Mask a single value
    Mask(commands::mask::MaskArgs),

    /// Add Laplace noise to a statistic
    Noise(commands::noise::NoiseArgs),

    /// Remove expired entries from a timestamp store file
    Retention(commands::retention::RetentionArgs),

    /// Verify a signed audit log
    Verify(commands::verify::VerifyArgs),
}

impl Commands {
    /// Run the command and return its exit code
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            Commands::Init(args) => args.execute(),
            Commands::ValidateConfig(args) => args.execute(config_path),
            Commands::Anonymize(args) => args.execute(config_path),
            Commands::Mask(args) => args.execute(config_path),
            Commands::Noise(args) => args.execute(config_path),
            Commands::Retention(args) => args.execute(config_path),
            Commands::Verify(args) => args.execute(),
        }
    }
}
