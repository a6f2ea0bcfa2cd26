// Web dashboard: HTML page, JSON endpoints and the listener handle

pub mod handlers;
pub mod template;

use crate::analyzer::AnalyzerImpl;
use crate::source::MarketSource;
use axum::Router;
use axum::routing::get;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MarketSource>,
    pub analyzer: AnalyzerImpl,
    /// Used when a request carries no `hours` parameter.
    pub default_hours: f64,
}

impl AppState {
    pub fn new(source: Arc<dyn MarketSource>, analyzer: AnalyzerImpl, default_hours: f64) -> Self {
        Self {
            source,
            analyzer,
            default_hours,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/signal", get(handlers::signal))
        .route("/api/snapshot", get(handlers::snapshot))
        .with_state(state)
}

/// Running dashboard listener.
pub struct DashboardServer {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<io::Result<()>>,
}

impl DashboardServer {
    /// Binds `addr` and serves in a background task until [`stop`](Self::stop).
    pub async fn start(state: AppState, addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let (shutdown, signal) = oneshot::channel::<()>();
        let app = router(state);

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    signal.await.ok();
                })
                .await
        });

        info!("Dashboard listening on http://{}", local_addr);
        Ok(Self {
            local_addr,
            shutdown,
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Signals graceful shutdown and waits for the serve task.
    pub async fn stop(self) -> io::Result<()> {
        self.shutdown.send(()).ok();
        let result = self.task.await.map_err(io::Error::other)?;
        info!("Dashboard on {} stopped", self.local_addr);
        result
    }
}
