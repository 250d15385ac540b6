use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::http::connection::Connection;
use crate::server::Site;

pub async fn bind(cfg: &ServerConfig) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Serves connections one at a time, forever.
///
/// Each connection is handled to completion before the next accept. A failure
/// inside one connection is logged and never ends the loop.
pub async fn serve(listener: TcpListener, site: &Site, cfg: &ServerConfig) -> anyhow::Result<()> {
    info!(root = %site.doc_root.display(), "Serving directory");

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                // Errors like EMFILE persist; back off instead of spinning.
                tokio::time::sleep(Duration::from_millis(cfg.accept_retry_delay_ms)).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let mut conn = Connection::new(socket, site, cfg.read_buffer_size);
        if let Err(e) = conn.run().await {
            error!("Connection error from {}: {}", peer, e);
        }
    }
}

pub async fn run(cfg: &ServerConfig, site: &Site) -> anyhow::Result<()> {
    let listener = bind(cfg).await?;
    serve(listener, site, cfg).await
}
