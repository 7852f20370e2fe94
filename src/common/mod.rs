//! # Common Components
//!
//! Shared utilities used by both binaries.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration loading
//! - [`logging`]: `env_logger` bootstrap

pub mod config;
pub mod logging;
