//! Core library for heuristic receipt reconstruction.
//!
//! This crate provides:
//! - OCR input decoding (AWS Textract responses and flattened line lists)
//! - Reading-order reconstruction from fragment geometry
//! - Value normalizers for prices, dates, names, and quantities
//! - A single-pass field classifier and receipt assembler

pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;

pub use error::{RcptError, Result};
pub use models::config::RcptConfig;
pub use models::receipt::{Item, Money, Receipt};
pub use ocr::{Fragment, OcrDocument, OrderedFragments, Position};
pub use receipt::{HeuristicReconstructor, ImageContext, ReceiptReconstructor};
