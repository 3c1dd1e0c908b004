//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "aegis.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Aegis configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set AEGIS_GATE_PIN in a .env file to require a PIN");
                println!("  3. Validate configuration: aegis validate-config");
                println!("  4. Anonymize records: aegis anonymize --input records.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Default configuration with every setting spelled out
    pub fn generate_config() -> String {
        r#"# Aegis Configuration File
# Privacy-preserving record transformation and signed audit ledger

[application]
log_level = "info"  # trace | debug | info | warn | error

[anonymization]
# Released groups have at least k records and l distinct sensitive values
k = 3
l_diversity = 2
# Laplace mechanism privacy budget (> 0)
epsilon = 1.0
# Stored records older than this are removed by the retention sweep
retention_days = 30

[anonymization.masking]
mask_char = "*"
visible_prefix = 2

[audit]
# Suspicious burst: at least burst_threshold same-type events in burst_window_ms
burst_window_ms = 3000
burst_threshold = 3
# Rate limit: more than rate_limit_max_events same-type events in rate_limit_window_ms
rate_limit_window_ms = 60000
rate_limit_max_events = 5
export_path = "./audit/signed_log.json"
public_key_path = "./audit/ledger_public.pem"

[gate]
# Uncomment to require a PIN (read from the environment)
# pin = "${AEGIS_GATE_PIN}"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
