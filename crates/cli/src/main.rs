mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use qbclean_core::{
    load_config, validate_config, FsProbe, QBittorrentClient, Reconciler, SanitizedConfig,
    TorrentClient,
};

use cli::{Args, LogFormat};

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.log_format);

    if let Err(e) = run(args).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn run(args: Args) -> Result<()> {
    // Load configuration
    match &args.config {
        Some(path) => info!("Loading configuration from {:?}", path),
        None => info!("Loading configuration from environment"),
    }
    let mut config = load_config(args.config.as_deref()).context("Failed to load config")?;
    args.apply(&mut config);

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let sanitized = SanitizedConfig::from(&config);
    debug!(
        "Effective configuration: {}",
        serde_json::to_string(&sanitized).unwrap_or_default()
    );
    info!("qBittorrent URL: {}", config.server.url);
    info!("Download dirs: {:?}", config.reconcile.download_dirs);

    // Create torrent client
    let client: Arc<dyn TorrentClient> = Arc::new(
        QBittorrentClient::new(config.server.clone())
            .context("Failed to create qBittorrent client")?,
    );
    info!("Using torrent client: {}", client.name());

    let reconciler = Reconciler::new(client, Arc::new(FsProbe), config.reconcile)
        .context("Failed to create reconciler")?;
    if reconciler.config().dry_run {
        info!("Dry run: no torrent will be removed");
    } else if !reconciler.config().delete_files {
        info!("Keeping data of removed torrents on disk");
    }

    let report = reconciler.run().await.context("Reconciliation failed")?;

    if report.is_empty() {
        return Ok(());
    }

    for outcome in &report.outcomes {
        if let Some(missing) = outcome.verdict.missing_file() {
            info!(
                hash = %outcome.hash,
                verdict = outcome.verdict.as_str(),
                missing,
                "{}",
                outcome.name
            );
        }
    }

    Ok(())
}
