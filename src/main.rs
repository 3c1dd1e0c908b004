// Aegis - Privacy-preserving record transformation and signed audit ledger
// Copyright (c) 2025 Aegis Contributors
// Licensed under the MIT License

use aegis::cli::Cli;
use aegis::config::{load_config, LoggingConfig};
use aegis::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging only when an existing, valid configuration enables it;
    // configuration errors are reported by the command itself
    let (config_level, logging_config) = match load_config(&cli.config) {
        Ok(config) => (Some(config.application.log_level), config.logging),
        Err(_) => (None, LoggingConfig::console_only()),
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Aegis - privacy-preserving record transformation"
    );

    let exit_code = match cli.command.execute(&cli.config) {
        Ok(code) => code,
        Err(e) => {
            aegis::log_error_with_context!(&e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors, so flush the log writer first
    drop(guard);
    process::exit(exit_code);
}
