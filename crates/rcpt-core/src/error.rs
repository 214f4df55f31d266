//! Error types for the rcpt-core library.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// OCR input decoding error.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Receipt reconstruction error.
    #[error("reconstruction error: {0}")]
    Reconstruction(#[from] ReconstructionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to decoding OCR provider output.
#[derive(Error, Debug)]
pub enum InputError {
    /// The document is not valid JSON or does not match any known shape.
    #[error("malformed OCR document: {0}")]
    Malformed(String),
}

/// Errors a reconstruction strategy may report.
///
/// The heuristic path is fail-soft and never produces these; they exist for
/// strategies backed by external services.
#[derive(Error, Debug)]
pub enum ReconstructionError {
    /// The strategy is not available in this environment.
    #[error("reconstructor unavailable: {0}")]
    Unavailable(String),

    /// The strategy ran but returned output that is not a receipt.
    #[error("invalid reconstruction output: {0}")]
    InvalidOutput(String),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
