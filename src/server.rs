use std::net::SocketAddr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::app::{self, AppState};
use crate::config::{AppConfig, AuthMode};
use crate::store;

/// A running server instance. Holding the listener and pool handles here,
/// rather than in process-wide state, lets tests start and stop several
/// instances side by side.
#[derive(Debug)]
pub struct Server {
    addr: SocketAddr,
    pool: SqlitePool,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl Server {
    /// Connect the database, bind the listener and start serving. The
    /// database is opened before the first connection can be accepted.
    pub async fn start(config: AppConfig) -> Result<Self> {
        if config.auth == AuthMode::Required && config.jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must be set when authentication is enabled");
        }

        let pool = store::connect(&config.database_url)
            .await
            .with_context(|| format!("failed to open database {}", config.database_url))?;

        let state = AppState::new(pool.clone(), &config);
        let router = app::router(state);

        let bind_addr = format!("0.0.0.0:{}", config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind {bind_addr}"))?;
        let addr = listener.local_addr()?;

        let (shutdown, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await
        });

        tracing::info!(%addr, "listening");
        Ok(Self { addr, pool, shutdown, task })
    }

    /// The bound address; with port 0 this reveals the ephemeral port.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections, drain the serve task, then close the
    /// database - in that order.
    pub async fn stop(self) -> Result<()> {
        let _ = self.shutdown.send(());
        self.task
            .await
            .context("server task panicked")?
            .context("server error during shutdown")?;
        self.pool.close().await;
        tracing::info!("server stopped");
        Ok(())
    }
}

/// Serve until ctrl-c, then shut down cleanly.
pub async fn run(config: AppConfig) -> Result<()> {
    let server = Server::start(config).await?;
    tokio::signal::ctrl_c().await.context("failed to listen for shutdown signal")?;
    tracing::info!("shutdown requested");
    server.stop().await
}
