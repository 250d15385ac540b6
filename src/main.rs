use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shelf::config::Config;
use shelf::server::{Site, listener};

/// Serve a directory over HTTP/1.1.
#[derive(Debug, Parser)]
#[command(name = "shelf-server", version)]
struct Args {
    /// Directory to serve
    doc_root: PathBuf,

    /// YAML configuration file (overrides SHELF_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let cfg = Config::load(args.config.as_deref())?;
    let site = Site::open(args.doc_root)?;

    tokio::select! {
        res = listener::run(&cfg.server, &site) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
