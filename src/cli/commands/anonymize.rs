//! Anonymize command implementation
//!
//! Reads a JSON array of personal records and releases the k-anonymous,
//! l-diverse subset.

use super::session::{read_input, run_protected, SessionArgs};
use crate::audit::write_atomically;
use crate::domain::{AegisError, PersonalData, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// JSON file with an array of `{age, gender, zip_code, disease}` records
    #[arg(short, long)]
    pub input: PathBuf,

    /// Minimum class size (defaults to `anonymization.k`)
    #[arg(long)]
    pub k: Option<usize>,

    /// Minimum distinct sensitive values per class (defaults to `anonymization.l_diversity`)
    #[arg(long)]
    pub l: Option<usize>,

    /// Write the released records here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub session: SessionArgs,
}

/// Parse a records file
pub fn read_records(path: &Path) -> Result<Vec<PersonalData>> {
    let contents = read_input(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        AegisError::InvalidFormat(format!("{} is not a JSON array of records: {e}", path.display()))
    })
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Anonymizing records");

        run_protected(config_path, &self.session, None, |session, config| {
            let start = Instant::now();
            let records = read_records(&self.input)?;
            let k = self.k.unwrap_or(config.anonymization.k);
            let l = self.l.unwrap_or(config.anonymization.l_diversity);

            let view = session.anonymize_for_display(&records, k, l)?;
            let document = serde_json::to_string_pretty(&view.records)?;
            crate::log_operation_complete!("anonymize", view.records.len(), start.elapsed());

            match &self.output {
                Some(output) => {
                    write_atomically(output, document.as_bytes())?;
                    println!("✅ Anonymized records written to {}", output.display());
                    println!();
                    println!("Summary (k={k}, l={l}):");
                    println!("  Input records: {}", records.len());
                    println!("  Released: {}", view.report.records_released);
                    println!("  Suppressed: {}", view.report.records_suppressed);
                    println!(
                        "  Groups released: {} of {}",
                        view.report.classes_released, view.report.classes_total
                    );
                }
                None => println!("{document}"),
            }
            Ok(0)
        })
    }
}
