use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod error;
mod ocr;
mod preprocessing;
mod region;

use region::Roi;

#[derive(Parser, Debug)]
#[command(name = "snaptext")]
#[command(about = "Extract text from a screenshot or captured frame")]
#[command(version)]
pub struct Args {
    /// Path to the input image (PNG recommended)
    #[arg(long)]
    pub image: PathBuf,

    /// Optional crop region "x,y,w,h" in source image pixels
    #[arg(long)]
    pub roi: Option<Roi>,

    /// Tesseract language (e.g., "eng", "deu", "fra")
    #[arg(long, env = "OCR_LANGUAGE", default_value = "eng")]
    pub lang: String,

    /// Tesseract page segmentation mode (default 7: single text line)
    #[arg(long, default_value_t = 7)]
    pub psm: u32,

    /// Emit the result as JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Optional path to write the preprocessed (binarized) image
    #[arg(long)]
    pub debug_out: Option<PathBuf>,

    /// Path to tessdata directory (downloaded into a cache if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing; logs go to stderr so stdout carries only the result
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from(args);

    tracing::debug!("snaptext v{}", env!("CARGO_PKG_VERSION"));

    app::run(config)?;
    Ok(())
}
