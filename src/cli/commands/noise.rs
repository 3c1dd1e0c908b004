//! Noise command implementation

use super::session::{run_protected, SessionArgs};
use crate::domain::NumericData;
use clap::Args;

/// Arguments for the noise command
#[derive(Args, Debug)]
pub struct NoiseArgs {
    /// Label of the statistic
    #[arg(long)]
    pub label: String,

    /// True value of the statistic
    #[arg(long, allow_hyphen_values = true)]
    pub value: f64,

    /// Privacy budget (defaults to `anonymization.epsilon`)
    #[arg(long)]
    pub epsilon: Option<f64>,

    #[command(flatten)]
    pub session: SessionArgs,
}

impl NoiseArgs {
    /// Execute the noise command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        run_protected(config_path, &self.session, None, |session, _config| {
            let sample = NumericData::new(self.label.clone(), self.value);
            let noisy = session.noisy_statistic(&sample, self.epsilon)?;
            println!("{}", serde_json::to_string(&noisy)?);
            Ok(0)
        })
    }
}
