//! CLI entry point for the collision filtering and plotting tool.
//!
//! Loads a GeoJSON collision dataset and optionally writes fatal/bicycle
//! subset files and histogram/barplot HTML charts.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use collisions::dataset::load_dataset;
use collisions::pipeline::{self, RunConfig};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "collisions")]
#[command(about = "Filter and plot a GeoJSON collision dataset", long_about = None)]
struct Cli {
    /// Path to the GeoJSON collision file
    #[arg(value_name = "GEOJSON_FILE")]
    geojson_file: PathBuf,

    /// Filter out fatal & bicycle collisions and write to new geojson files
    #[arg(short, long)]
    filter: bool,

    /// Plot a histogram and barplot
    #[arg(short, long)]
    plot: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/collisions.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("collisions.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let dataset = load_dataset(&cli.geojson_file)?;

    let config = RunConfig {
        run_filter: cli.filter,
        run_plot: cli.plot,
    };
    pipeline::run(&dataset, &config)?;

    Ok(())
}
