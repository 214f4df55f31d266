//! Configuration structures for the reconstruction pipeline.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RcptError, Result};

/// Note attached to every receipt produced by the heuristic path.
pub const HEURISTIC_CONFIDENCE_NOTES: &str =
    "Parsed heuristically from OCR output; no language model was used";

/// Main configuration for the rcpt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Reading-order configuration.
    pub ordering: OrderingConfig,

    /// Field classifier configuration.
    pub classifier: ClassifierConfig,

    /// Receipt assembler configuration.
    pub assembler: AssemblerConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Reading-order configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Height of the band within which fragments count as one row.
    /// 0.0 sorts by exact `top`.
    pub row_tolerance: f64,
}

/// Field classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Only the first N fragments may become the vendor.
    pub vendor_scan_limit: usize,

    /// Vendor fragments must have confidence strictly above this (0 - 100).
    pub vendor_min_confidence: f64,

    /// Minimum vendor name length in characters.
    pub vendor_min_length: usize,

    /// Item names shorter than this are dropped.
    pub item_min_name_length: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            vendor_scan_limit: 3,
            vendor_min_confidence: 90.0,
            vendor_min_length: 4,
            item_min_name_length: 2,
        }
    }
}

/// Receipt assembler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Append arithmetic consistency anomalies.
    pub cross_validate: bool,

    /// Absolute tolerance for consistency checks.
    pub tolerance: f64,

    /// Text stored in `confidence_notes`.
    pub confidence_notes: String,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            cross_validate: false,
            tolerance: 0.01,
            confidence_notes: HEURISTIC_CONFIDENCE_NOTES.to_string(),
        }
    }
}

impl AssemblerConfig {
    /// Tolerance as a decimal, rounded to cents.
    pub fn tolerance_decimal(&self) -> Decimal {
        Decimal::try_from(self.tolerance)
            .map(|d| d.round_dp(2).abs())
            .unwrap_or_else(|_| Decimal::new(1, 2))
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot use.
    pub fn check(&self) -> Result<()> {
        if !self.ordering.row_tolerance.is_finite() || self.ordering.row_tolerance < 0.0 {
            return Err(RcptError::Config(format!(
                "ordering.row_tolerance must be a non-negative number, got {}",
                self.ordering.row_tolerance
            )));
        }
        if !self.assembler.tolerance.is_finite() || self.assembler.tolerance < 0.0 {
            return Err(RcptError::Config(format!(
                "assembler.tolerance must be a non-negative number, got {}",
                self.assembler.tolerance
            )));
        }
        Ok(())
    }
}
