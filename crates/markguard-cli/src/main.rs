//! Markguard CLI - Trademark report extraction and conflict assessment.

use clap::Parser;
use markguard_cli::commands;
use markguard_cli::{Cli, Command, Config, Formatter};
use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> markguard_cli::Result<()> {
    // Service credentials may come from a local .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let config = Config::load_from(&config_path).unwrap_or_else(|e| {
        warn!("Ignoring unreadable config {}: {}", config_path.display(), e);
        Config::default()
    });

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &formatter).await?,
        Command::Assess(args) => commands::execute_assess(args, &config, &formatter).await?,
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await?
        }
    }

    Ok(())
}
