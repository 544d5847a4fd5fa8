use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::time::Instant;
use tracing::{Instrument, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::error::HttpError;
use crate::http::reader::Limits;
use crate::router::Router;
use crate::router::files::FileStore;

/// Creates the serving directory, binds, and accepts forever.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&cfg.directory)
        .await
        .with_context(|| format!("failed to create directory {}", cfg.directory.display()))?;

    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind to {}", cfg.listen_addr))?;
    info!(addr = %cfg.listen_addr, "Listening");

    let router = Router::new(FileStore::new(cfg.directory.clone()));
    info!(directory = %router.store().root().display(), "Serving files");
    serve(listener, router, cfg.timeout(), cfg.limits()).await
}

/// Accept loop: one task per connection, nothing shared but the router.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    timeout: Option<Duration>,
    limits: Limits,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await.context("accept failed")?;
        info!(%peer, "Accepted connection");

        let deadline = timeout.map(|t| Instant::now() + t);
        let router = router.clone();
        let span = tracing::info_span!("connection", %peer);
        tokio::spawn(
            async move {
                let conn = Connection::new(socket, router, deadline).with_limits(limits);
                match conn.run().await {
                    Ok(()) => {}
                    Err(HttpError::Timeout) => {
                        tracing::warn!(%peer, "Connection timed out");
                    }
                    Err(e) => {
                        tracing::error!(%peer, error = %e, "Connection error");
                    }
                }
            }
            .instrument(span),
        );
    }
}
