//! # Web Server Entry Point
//!
//! Thin wrapper that loads configuration and serves the steganography API.
//!
//! ```bash
//! cargo run --bin web_server -- --config config/stego.toml
//! ```

use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use lsb_stego::common::config::AppConfig;
use lsb_stego::common::logging::init_logger;
use lsb_stego::server::{router, AppState, StegoService};
use lsb_stego::Codec;

/// Command-line arguments for the web server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address from the config
    #[arg(short, long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();
    let config = AppConfig::load_or_default(args.config.as_ref())?;
    let address = args.address.unwrap_or(config.server.address.clone());

    info!("🚀 Initializing web server...");

    let service = StegoService::new(Codec::new(config.codec), &config.server.output_dir)?;
    let state = Arc::new(AppState { service });
    let app = router(state, config.server.max_upload_bytes);

    info!("🌐 Web server running on http://{}", address);
    info!(
        "📁 Writing stego images to {}",
        config.server.output_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(&address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
