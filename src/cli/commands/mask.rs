//! Mask command implementation

use super::session::{run_protected, SessionArgs};
use crate::anonymization::DataType;
use clap::Args;

/// Arguments for the mask command
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Kind of value: email, phone, name or dni
    #[arg(short, long)]
    pub data_type: DataType,

    /// Replacement character (defaults to `anonymization.masking.mask_char`)
    #[arg(long)]
    pub mask_char: Option<char>,

    /// Visible characters of an email local part (defaults to `anonymization.masking.visible_prefix`)
    #[arg(long)]
    pub visible_prefix: Option<usize>,

    /// Value to mask
    pub value: String,

    #[command(flatten)]
    pub session: SessionArgs,
}

impl MaskArgs {
    /// Execute the mask command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::debug!(data_type = %self.data_type, "Masking value");

        run_protected(config_path, &self.session, None, |session, _config| {
            let mut policy = session.default_policy(self.data_type);
            if let Some(mask_char) = self.mask_char {
                policy = policy.with_mask_char(mask_char);
            }
            if let Some(visible_prefix) = self.visible_prefix {
                policy = policy.with_visible_prefix(visible_prefix);
            }

            println!("{}", session.mask_field(&self.value, &policy)?);
            Ok(0)
        })
    }
}
