//! Turns classifier output into the final receipt record.

use tracing::debug;

use crate::models::config::AssemblerConfig;
use crate::models::receipt::{Item, Receipt};

use super::classifier::ClassifierState;
use super::rules::DEFAULT_QUANTITY;

/// Receipt assembler.
pub struct ReceiptAssembler {
    config: AssemblerConfig,
}

impl ReceiptAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Freeze the accumulated state into a [`Receipt`].
    ///
    /// Unstated quantities become [`DEFAULT_QUANTITY`] here. Consistency
    /// anomalies are only appended when cross-validation is enabled.
    pub fn assemble(&self, state: ClassifierState) -> Receipt {
        let items = state
            .items
            .into_iter()
            .map(|candidate| Item {
                name: candidate.name,
                qty: candidate
                    .qty
                    .filter(|&q| q >= 1)
                    .unwrap_or(DEFAULT_QUANTITY),
                price: candidate.price,
            })
            .collect();

        let mut receipt = Receipt {
            vendor: state.vendor.unwrap_or_default(),
            date: state.date.unwrap_or_default(),
            items,
            subtotal: state.subtotal,
            tax: state.tax,
            total: state.total,
            confidence_notes: self.config.confidence_notes.clone(),
            anomalies: Vec::new(),
        };

        if self.config.cross_validate {
            let issues = receipt.validate(self.config.tolerance_decimal());
            debug!("Cross-validation found {} anomalies", issues.len());
            receipt.anomalies.extend(issues);
        }

        receipt
    }
}

impl Default for ReceiptAssembler {
    fn default() -> Self {
        Self::new(AssemblerConfig::default())
    }
}
