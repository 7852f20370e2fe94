use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[server]` table of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:8000")
    pub address: String,
    /// Directory receiving generated stego images
    pub output_dir: PathBuf,
    /// Largest accepted multipart request body, in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:8000".to_string(),
            output_dir: PathBuf::from("temp_outputs"),
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}
