//! # Server Core - Steganography Service
//!
//! The core server component performs embed and extract requests and owns the
//! output directory. HTTP concerns live in [`api`](super::api).
//!
//! Every request gets its own grid and selection map, so requests never share
//! state. Output files are named with a fresh UUID to avoid collisions.

use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::processing::{Codec, EmbedReport, ExtractReport, StegoError};

/// An embed result persisted to the output directory.
#[derive(Debug, Clone)]
pub struct StoredEmbed {
    pub report: EmbedReport,
    pub output_filename: String,
}

/// Core server component that runs the codec off the async runtime.
pub struct StegoService {
    codec: Codec,
    output_dir: PathBuf,
}

impl StegoService {
    /// Create the service, making sure `output_dir` exists.
    pub fn new(codec: Codec, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self { codec, output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Embed `message` and store the PNG as `<uuid>_output.png`.
    pub async fn embed(
        &self,
        image_data: Vec<u8>,
        message: String,
        key: i64,
    ) -> Result<StoredEmbed, ServiceError> {
        let codec = self.codec;

        // Steganography is CPU-bound; keep it off the async workers
        let report = tokio::task::spawn_blocking(move || codec.embed(&image_data, &message, key))
            .await
            .map_err(|e| ServiceError::Internal(format!("embed task panicked: {}", e)))??;

        let output_filename = format!("{}_output.png", Uuid::new_v4());
        let path = self.output_dir.join(&output_filename);
        tokio::fs::write(&path, &report.image)
            .await
            .map_err(StegoError::Io)?;

        info!(
            "✅ Stored {} ({} message bits, capacity {})",
            output_filename, report.message_length_bits, report.capacity
        );

        Ok(StoredEmbed {
            report,
            output_filename,
        })
    }

    pub async fn extract(
        &self,
        image_data: Vec<u8>,
        key: i64,
        message_length: Option<usize>,
    ) -> Result<ExtractReport, ServiceError> {
        let codec = self.codec;
        let report =
            tokio::task::spawn_blocking(move || codec.extract(&image_data, key, message_length))
                .await
                .map_err(|e| ServiceError::Internal(format!("extract task panicked: {}", e)))??;

        info!("✅ Extracted {} bits", report.bits_extracted);
        Ok(report)
    }

    /// Delete a previously generated image.
    pub async fn cleanup(&self, filename: &str) -> Result<(), ServiceError> {
        let path = self.stored_path(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!("🗑️ Deleted {}", filename);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ServiceError::NotFound(filename.to_string()))
            }
            Err(e) => Err(StegoError::Io(e).into()),
        }
    }

    /// Resolve `filename` inside the output directory, rejecting traversal.
    fn stored_path(&self, filename: &str) -> Result<PathBuf, ServiceError> {
        let is_plain = !filename.is_empty()
            && filename != "."
            && filename != ".."
            && !filename.contains(&['/', '\\'][..]);
        if !is_plain {
            return Err(ServiceError::BadRequest(format!(
                "invalid filename: {}",
                filename
            )));
        }
        Ok(self.output_dir.join(filename))
    }
}

/// Failures surfaced by the service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Stego(#[from] StegoError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}
