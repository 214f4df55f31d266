//! The deterministic, model-free reconstruction path.

use std::time::Instant;

use tracing::{debug, info};

use crate::error::Result;
use crate::models::config::{AssemblerConfig, ClassifierConfig, OrderingConfig, RcptConfig};
use crate::models::receipt::Receipt;
use crate::ocr::{Fragment, OcrDocument, OrderedFragments};

use super::assembler::ReceiptAssembler;
use super::classifier::FieldClassifier;
use super::{ImageContext, ReceiptReconstructor};

/// Heuristic reconstructor: order, classify, assemble.
///
/// Holds only configuration; every call owns its own pass state, so one
/// instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct HeuristicReconstructor {
    ordering: OrderingConfig,
    classifier: ClassifierConfig,
    assembler: AssemblerConfig,
}

impl HeuristicReconstructor {
    /// Create a reconstructor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconstructor from pipeline configuration.
    pub fn from_config(config: &RcptConfig) -> Self {
        Self {
            ordering: config.ordering.clone(),
            classifier: config.classifier.clone(),
            assembler: config.assembler.clone(),
        }
    }

    /// Set the reading-order row tolerance.
    pub fn with_row_tolerance(mut self, tolerance: f64) -> Self {
        self.ordering.row_tolerance = tolerance;
        self
    }

    /// Enable or disable arithmetic cross-validation.
    pub fn with_cross_validation(mut self, enabled: bool) -> Self {
        self.assembler.cross_validate = enabled;
        self
    }

    /// Reconstruct a receipt from raw fragments. Never fails.
    pub fn reconstruct_fragments(&self, fragments: &[Fragment]) -> Receipt {
        let start = Instant::now();

        info!("Reconstructing receipt from {} fragments", fragments.len());

        let ordered = OrderedFragments::with_tolerance(fragments, self.ordering.row_tolerance);
        let state = FieldClassifier::new(self.classifier.clone()).classify_all(&ordered);
        let receipt = ReceiptAssembler::new(self.assembler.clone()).assemble(state);

        debug!(
            "Reconstructed receipt for {:?}: {} items, total {} in {:?}",
            receipt.vendor,
            receipt.items.len(),
            receipt.total,
            start.elapsed()
        );

        receipt
    }
}

impl ReceiptReconstructor for HeuristicReconstructor {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn reconstruct(&self, document: &OcrDocument, _image: Option<&ImageContext>) -> Result<Receipt> {
        debug!(
            "Heuristic path ignores image context; document has {} pages",
            document.page_count
        );
        Ok(self.reconstruct_fragments(&document.lines))
    }
}
