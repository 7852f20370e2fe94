//! # HTTP API
//!
//! Multipart upload endpoints around [`StegoService`].
//!
//! | Method | Path                   | Purpose                          |
//! |--------|------------------------|----------------------------------|
//! | GET    | `/`                    | Service descriptor               |
//! | GET    | `/health`              | Health check                     |
//! | POST   | `/embed`               | Hide a message in an image       |
//! | POST   | `/extract`             | Recover a message from an image  |
//! | GET    | `/download/{filename}` | Fetch a generated image          |
//! | DELETE | `/cleanup/{filename}`  | Delete a generated image         |

use axum::{
    extract::{multipart::Multipart, DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use log::{error, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::server::{ServiceError, StegoService};
use crate::processing::StegoError;

pub struct AppState {
    pub service: StegoService,
}

#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub success: bool,
    pub bits_embedded: usize,
    pub message_length: usize,
    pub capacity: usize,
    pub output_filename: String,
    pub download_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub message: String,
    pub bits_extracted: usize,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP-facing error with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Stego(StegoError::InvalidKey { .. }) => StatusCode::BAD_REQUEST,
            ServiceError::Stego(e) if e.is_input_error() => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Stego(_) | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("❌ {}", self.message);
        } else {
            warn!("⚠️ {}", self.message);
        }
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Build the router. Generated images are served straight from the output
/// directory.
pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    let output_dir = state.service.output_dir().to_path_buf();
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/embed", post(embed_handler))
        .route("/extract", post(extract_handler))
        .route("/cleanup/:filename", delete(cleanup_handler))
        .nest_service("/download", ServeDir::new(output_dir))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Steganography API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /embed": "Embed a message in an image",
            "POST /extract": "Extract a message from an image",
            "GET /download/{filename}": "Download a steganography image",
            "DELETE /cleanup/{filename}": "Delete a steganography image",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn embed_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<EmbedResponse>, ApiError> {
    let mut form = UploadForm::read(multipart).await?;
    let image = form.take_image()?;
    let message = form.required("message")?.to_string();
    let key = parse_key(form.required("key")?)?;
    let inline = form.flag("inline");

    info!(
        "📤 Embed request: {} ({} bytes, {} message bytes)",
        form.filename,
        image.len(),
        message.len()
    );

    let stored = state.service.embed(image, message, key).await?;
    let report = stored.report;

    Ok(Json(EmbedResponse {
        success: true,
        bits_embedded: report.bits_embedded,
        message_length: report.message_length_bits,
        capacity: report.capacity,
        download_url: format!("/download/{}", stored.output_filename),
        output_filename: stored.output_filename,
        image_base64: inline.then(|| general_purpose::STANDARD.encode(&report.image)),
    }))
}

async fn extract_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, ApiError> {
    let mut form = UploadForm::read(multipart).await?;
    let image = form.take_image()?;
    let key = parse_key(form.required("key")?)?;
    let message_length = parse_length(form.optional("message_length"))?;

    info!(
        "📥 Extract request: {} ({} bytes)",
        form.filename,
        image.len()
    );

    let report = state.service.extract(image, key, message_length).await?;
    Ok(Json(ExtractResponse {
        success: true,
        message: report.message,
        bits_extracted: report.bits_extracted,
    }))
}

async fn cleanup_handler(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.service.cleanup(&filename).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": format!("File {} deleted", filename)
    })))
}

/// Buffered multipart form: one file field named `image`, the rest as text.
struct UploadForm {
    image: Option<Vec<u8>>,
    filename: String,
    fields: HashMap<String, String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self {
            image: None,
            filename: String::from("upload"),
            fields: HashMap::new(),
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read multipart data: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "image" {
                form.filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read image data: {}", e))
                })?;
                form.image = Some(data.to_vec());
            } else {
                let text = field.text().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read field '{}': {}", name, e))
                })?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    fn take_image(&mut self) -> Result<Vec<u8>, ApiError> {
        self.image
            .take()
            .ok_or_else(|| ApiError::bad_request("No image provided"))
    }

    fn required(&self, name: &str) -> Result<&str, ApiError> {
        self.optional(name)
            .ok_or_else(|| ApiError::bad_request(format!("Missing field '{}'", name)))
    }

    fn optional(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn flag(&self, name: &str) -> bool {
        matches!(self.optional(name), Some("true" | "1" | "yes" | "on"))
    }
}

fn parse_key(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::bad_request(format!("Key must be an integer, got '{}'", raw)))
}

fn parse_length(raw: Option<&str>) -> Result<Option<usize>, ApiError> {
    raw.map(|raw| {
        raw.parse::<usize>().map_err(|_| {
            ApiError::bad_request(format!(
                "message_length must be a non-negative integer, got '{}'",
                raw
            ))
        })
    })
    .transpose()
}
