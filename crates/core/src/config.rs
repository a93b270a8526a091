//! Configuration structures for the wine dataset builder.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default raw CSV export path.
pub const DEFAULT_INPUT_PATH: &str = "raw.csv";

/// Default compressed dataset path.
pub const DEFAULT_OUTPUT_PATH: &str = "dataset.latest.json.gz";

/// Default recency window for trusting a last trade, in days.
pub const CUTOFF_DAYS: i64 = 90;

/// Main configuration for a dataset build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input/output locations.
    pub io: IoConfig,
    /// Price resolution configuration.
    pub pricing: PricingConfig,
}

impl Config {
    /// Check the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.io.input_path.as_os_str().is_empty() {
            return Err(Error::config("input path is empty"));
        }
        if self.io.output_path.as_os_str().is_empty() {
            return Err(Error::config("output path is empty"));
        }
        if self.pricing.cutoff_days < 0 {
            return Err(Error::config(format!(
                "cutoff_days must be non-negative, got {}",
                self.pricing.cutoff_days
            )));
        }
        Ok(())
    }
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    /// Raw CSV export to read.
    pub input_path: PathBuf,
    /// Gzip-compressed JSON dataset to write (overwritten each run).
    pub output_path: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

/// Price waterfall configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Maximum age of a last trade, in whole days, for it to be used directly.
    /// The boundary is inclusive.
    pub cutoff_days: i64,
    /// Add `Predicted_Price` and `Relative_Value` from a price-versus-score fit.
    #[serde(default)]
    pub relative_value: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            cutoff_days: CUTOFF_DAYS,
            relative_value: false,
        }
    }
}
