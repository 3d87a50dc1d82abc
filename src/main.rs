//! Salesweb main entry point

use anyhow::Context;
use clap::Parser;
use salesweb_api::start_server;
use salesweb_config::Config;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "salesweb")]
#[command(author = "Salesweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Fuel-station sales report and pump transaction records", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = Config::load_or_default(args.config.clone())
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    config.validate().context("Invalid configuration")?;

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    if !args.config.exists() {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!(
        "Config loaded from {}: {} pumps, upload limit {} MB",
        args.config.display(),
        config.records.pumps.len(),
        config.upload.max_size_mb
    );

    let rt = Runtime::new()?;
    rt.block_on(start_server(config))?;

    Ok(())
}
