//! Receipt reconstruction from OCR fragments.

pub mod assembler;
pub mod classifier;
mod heuristic;
pub mod rules;

pub use assembler::ReceiptAssembler;
pub use classifier::{Classification, ClassifierState, FieldClassifier, ItemCandidate};
pub use heuristic::HeuristicReconstructor;

use std::path::PathBuf;

use crate::error::Result;
use crate::models::receipt::Receipt;
use crate::ocr::OcrDocument;

/// The scanned image a document came from, for strategies that look at it.
#[derive(Debug, Clone)]
pub struct ImageContext {
    /// Path to the image file.
    pub path: PathBuf,
    /// MIME type, when known.
    pub media_type: Option<String>,
}

/// A strategy that rebuilds a [`Receipt`] from OCR output.
///
/// Every strategy produces the same output schema, so callers can switch
/// between the heuristic path and model-backed paths freely.
pub trait ReceiptReconstructor: Send + Sync {
    /// Short identifier for logs and output envelopes.
    fn name(&self) -> &str;

    /// Reconstruct a receipt from a document and optional image context.
    fn reconstruct(&self, document: &OcrDocument, image: Option<&ImageContext>) -> Result<Receipt>;
}
