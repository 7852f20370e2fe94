//! # Server Components
//!
//! - [`server`]: the steganography service (codec + output directory)
//! - [`api`]: axum routes and multipart handling
//! - [`config`]: the `[server]` configuration table

pub mod api;
pub mod config;
pub mod server;

pub use api::{router, AppState};
pub use config::ServerConfig;
pub use server::{ServiceError, StegoService};
