use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use euterpe_config::Config;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod pages;
mod routes;
mod state;
mod stats;

use self::state::DatasetCache;

#[derive(Parser, Debug)]
#[command(name = "euterpe-dashboard")]
#[command(about = "Charts over the POS-tagged lyrics snapshot")]
#[command(version)]
struct Args {
    /// JSON config profile; EUTERPE_CONFIG or ./config.json otherwise
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the profile
    #[arg(short, long)]
    bind: Option<String>,

    /// Tagged JSON Lines snapshot to serve
    #[arg(short, long)]
    snapshot: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.apply_env();
            config
        }
        None => Config::load()?,
    };
    if let Some(bind) = args.bind {
        config.dashboard.bind = bind;
    }
    if let Some(snapshot) = args.snapshot {
        config.dashboard.snapshot = Some(snapshot);
    }

    let snapshot = config.dashboard_snapshot();
    let cache = Arc::new(DatasetCache::new(snapshot.clone()));
    let app = routes::router(cache);

    let listener = tokio::net::TcpListener::bind(&config.dashboard.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.dashboard.bind))?;
    tracing::info!(
        addr = %config.dashboard.bind,
        snapshot = %snapshot.display(),
        "Dashboard listening"
    );

    let shutdown = CancellationToken::new();
    tokio::spawn(watch_ctrl_c(shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("Server error")?;

    tracing::info!("Dashboard stopped");
    Ok(())
}

async fn watch_ctrl_c(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        return;
    }
    tracing::info!("Ctrl+C received, shutting down");
    shutdown.cancel();
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
