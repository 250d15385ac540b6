use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shelf::client::{self, request_url};
use shelf::config::Config;

/// Fetch one resource and print or save it.
#[derive(Debug, Parser)]
#[command(name = "shelf-get", version)]
struct Args {
    /// Server host name or address
    host: String,

    /// Server port
    port: u16,

    /// URL path to request, e.g. /docs/report.pdf
    url_path: String,

    /// Directory where binary downloads are written
    directory: PathBuf,

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
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = Config::load(args.config.as_deref())?;

    let url = request_url(&args.host, args.port, &args.url_path)?;
    tracing::info!("Requesting: {}", url);

    let response = client::get(&url, &cfg.client).await?;
    let mut stdout = std::io::stdout().lock();
    client::present(&response, &url, &args.directory, &mut stdout).await?;

    Ok(())
}
