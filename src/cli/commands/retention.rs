//! Retention command implementation
//!
//! Sweeps a JSON object of `key -> insertion timestamp (epoch millis)` and
//! rewrites it in place.

use super::session::{read_input, run_protected, SessionArgs};
use crate::anonymization::RetentionStore;
use crate::audit::write_atomically;
use crate::domain::{AegisError, Result};
use crate::protection::{MemoryRecordStore, RecordStore};
use clap::Args;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the retention command
#[derive(Args, Debug)]
pub struct RetentionArgs {
    /// JSON file mapping keys to insertion timestamps
    #[arg(short, long)]
    pub store: PathBuf,

    /// Retention period in days (defaults to `anonymization.retention_days`)
    #[arg(long)]
    pub max_days: Option<u32>,

    #[command(flatten)]
    pub session: SessionArgs,
}

/// Parse a timestamp store file
pub fn read_store(path: &Path) -> Result<RetentionStore> {
    let contents = read_input(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        AegisError::InvalidFormat(format!(
            "{} is not a JSON object of key -> timestamp: {e}",
            path.display()
        ))
    })
}

/// Rewrite a timestamp store file with sorted keys
pub fn write_store(path: &Path, store: &RetentionStore) -> Result<()> {
    let sorted: BTreeMap<&String, &i64> = store.iter().collect();
    let document = serde_json::to_string_pretty(&sorted)?;
    write_atomically(path, document.as_bytes())
}

impl RetentionArgs {
    /// Execute the retention command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(store = %self.store.display(), "Enforcing retention policy");

        let timestamps = match read_store(&self.store) {
            Ok(timestamps) => timestamps,
            Err(e) => {
                println!("❌ {e}");
                return Ok(e.exit_code());
            }
        };
        let store = Arc::new(MemoryRecordStore::from_timestamps(timestamps));
        let before = store.len();

        let shared: Arc<dyn RecordStore> = store.clone();
        run_protected(config_path, &self.session, Some(shared), |session, _config| {
            let removed = session.enforce_retention(self.max_days);
            write_store(&self.store, &store.timestamps())?;

            println!("✅ Retention sweep completed: {}", self.store.display());
            println!("  Entries before: {before}");
            println!("  Removed: {removed}");
            println!("  Remaining: {}", store.len());
            Ok(0)
        })
    }
}
