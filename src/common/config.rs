//! # Configuration
//!
//! TOML configuration shared by the CLI and the web server. Every field has a
//! default, so a missing table (or an empty file) is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::processing::CodecOptions;
use crate::server::ServerConfig;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Example
/// ```ignore
/// let config: AppConfig = load_config("config/stego.toml")?;
/// ```
pub fn load_config<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: T = toml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

/// Top-level configuration.
///
/// # Example TOML
///
/// ```toml
/// [server]
/// address = "0.0.0.0:8000"
/// output_dir = "temp_outputs"
///
/// [codec]
/// canonical_width = 2048
/// canonical_height = 2048
/// framing = "raw"            # or "length_prefixed"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub codec: CodecOptions,
}

impl AppConfig {
    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }
}
