use clap::Parser;
use koi::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "koi", about = "Floating assistant overlay for step-by-step walkthroughs")]
struct Args {
    /// Base URL of the action catalog service
    #[arg(short, long)]
    catalog_url: Option<String>,

    /// Disable the 3x3 region highlight overlay
    #[arg(long)]
    no_highlight: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to koi.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("koi.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}; falling back to defaults", e);
        config::KoiConfig::default()
    });
    let cli = CliOverrides {
        catalog_url: args.catalog_url,
        highlight_enabled: args.no_highlight.then_some(false),
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Koi starting up: catalog={}, highlight={}",
        resolved.catalog_url,
        resolved.highlight_enabled
    );

    koi::tui::run(resolved)
}
