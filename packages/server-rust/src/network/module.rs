//! Network module with deferred startup lifecycle.
//!
//! `new()` creates shared resources, `start()` binds the TCP listener, and
//! `serve()` accepts connections until shutdown. Splitting bind from serve
//! lets callers learn the OS-assigned port before traffic flows.

use std::future::{Future, IntoFuture};
use std::sync::Arc;

use anyhow::anyhow;
use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn, Instrument};

use super::config::NetworkConfig;
use super::handlers::routes;
use super::middleware::build_http_layers;
use super::shutdown::ShutdownController;

/// Owns the HTTP server lifecycle.
///
/// 1. `new()` -- allocates the shutdown controller
/// 2. `start()` -- binds the TCP listener to the configured address
/// 3. `serve()` -- serves until the shutdown future resolves or the
///    controller is triggered, then drains open connections
pub struct NetworkModule {
    config: NetworkConfig,
    listener: Option<TcpListener>,
    shutdown: Arc<ShutdownController>,
}

impl NetworkModule {
    /// Creates a new network module without binding any port.
    #[must_use]
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            listener: None,
            shutdown: Arc::new(ShutdownController::new()),
        }
    }

    /// Returns a shared reference to the shutdown controller.
    ///
    /// Calling `trigger_shutdown()` on it stops a running `serve()`.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    /// Assembles the axum router with the operation routes and middleware.
    pub fn build_router(&self) -> Router {
        routes().layer(build_http_layers(&self.config))
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the bound port, which differs from the configured one when
    /// port 0 is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        let port = listener.local_addr()?.port();

        info!(
            host = %self.config.host,
            port,
            "Calculator microservice running on http://localhost:{port}"
        );

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves connections until `shutdown` resolves or the shutdown
    /// controller is triggered.
    ///
    /// Once shutdown begins the listener stops accepting and open
    /// connections get up to `drain_timeout` to finish their requests;
    /// connections still open after that are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or if the server
    /// hits a fatal I/O error.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let listener = self
            .listener
            .take()
            .ok_or_else(|| anyhow!("start() must be called before serve()"))?;
        let router = self.build_router();

        // axum polls the signal on its own task; keep the caller's span on it.
        let controller = Arc::clone(&self.shutdown);
        let signal = async move {
            tokio::select! {
                () = shutdown => controller.trigger_shutdown(),
                () = controller.shutdown_requested() => {}
            }
        }
        .in_current_span();

        info!("Serving HTTP connections");
        let server = axum::serve(listener, router)
            .with_graceful_shutdown(signal)
            .into_future();

        let drain_timeout = self.config.drain_timeout;
        let deadline = async {
            self.shutdown.shutdown_requested().await;
            info!(
                timeout_secs = drain_timeout.as_secs_f64(),
                "Draining open connections"
            );
            tokio::time::sleep(drain_timeout).await;
        };

        tokio::select! {
            result = server => result?,
            () = deadline => warn!("Drain timeout expired, dropping open connections"),
        }

        info!("Server stopped");
        Ok(())
    }
}
