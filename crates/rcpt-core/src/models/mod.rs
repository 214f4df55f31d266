//! Data models: the receipt record and pipeline configuration.

pub mod config;
pub mod receipt;
