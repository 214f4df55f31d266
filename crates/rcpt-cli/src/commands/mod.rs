//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use rcpt_core::RcptConfig;

/// `<config_dir>/rcpt/config.json`, where `config init` and `config set` write.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rcpt")
        .join("config.json")
}

/// Load the configuration named by `-c`, else the default config file if it
/// exists, else the built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RcptConfig> {
    match config_path {
        Some(path) => load_config_from(Path::new(path)),
        None => {
            let path = default_config_path();
            if path.exists() {
                load_config_from(&path)
            } else {
                debug!("No config file at {}, using defaults", path.display());
                Ok(RcptConfig::default())
            }
        }
    }
}

fn load_config_from(path: &Path) -> anyhow::Result<RcptConfig> {
    debug!("Loading configuration from {}", path.display());
    Ok(RcptConfig::from_file(path)?)
}

/// Write `content` to `path`, creating parent directories. Returns bytes written.
pub fn write_output(path: &Path, content: &str) -> anyhow::Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(content.len())
}
