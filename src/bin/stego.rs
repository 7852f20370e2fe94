//! # Stego CLI
//!
//! Embed a message into an image, or extract it back.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin stego -- embed -i Family.png -o output/embedded_image.png -m "hello" -k 42
//! cargo run --bin stego -- extract -i output/embedded_image.png -k 42 --length 40
//! ```

use clap::{Parser, Subcommand};
use log::warn;
use std::path::PathBuf;

use lsb_stego::common::config::AppConfig;
use lsb_stego::common::logging::init_logger;
use lsb_stego::Codec;

/// Command-line arguments for the stego binary
#[derive(Parser, Debug)]
#[command(author, version, about = "Keyed LSB steganography for images", long_about = None)]
struct Args {
    /// Optional configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Embed a message into an image
    Embed {
        /// Input image path
        #[arg(short, long, default_value = "Family.png")]
        input: PathBuf,

        /// Output image path (always written as PNG)
        #[arg(short, long, default_value = "output/embedded_image.png")]
        output: PathBuf,

        /// Message to embed
        #[arg(short, long, default_value = "This is a secret message!")]
        message: String,

        /// Seed for the embedding map
        #[arg(short, long, default_value_t = 42, allow_negative_numbers = true)]
        key: i64,
    },
    /// Extract a message from an image
    Extract {
        /// Stego image path
        #[arg(short, long, default_value = "output/embedded_image.png")]
        input: PathBuf,

        /// Seed used when embedding
        #[arg(short, long, default_value_t = 42, allow_negative_numbers = true)]
        key: i64,

        /// Message length in bits (reads the full capacity when omitted)
        #[arg(short, long)]
        length: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();
    let config = AppConfig::load_or_default(args.config.as_ref())?;
    let codec = Codec::new(config.codec);

    match args.command {
        Command::Embed {
            input,
            output,
            message,
            key,
        } => {
            let report = codec.embed_file(&input, &output, &message, key)?;
            if report.truncated {
                warn!("Message did not fit; only the first {} bits were kept", report.capacity);
            }
            println!("✅ Embedding successful!");
            println!("Bits embedded: {}", report.bits_embedded);
            println!("Message length: {}", report.message_length_bits);
            println!("Capacity: {}", report.capacity);
            println!("Saved to: {}", output.display());
        }
        Command::Extract { input, key, length } => {
            let report = codec.extract_file(&input, key, length)?;
            println!("✅ Extraction complete");
            println!("Bits extracted: {}", report.bits_extracted);
            println!("Decoded message:\n{}", report.message);
        }
    }

    Ok(())
}
