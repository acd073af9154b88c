//! Spellgate HTTP server
//!
//! Owns the engine gate for the lifetime of the process. The router has a
//! single fallback route, so every path reaches the check handler.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use spellgate_core::SpellEngine;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::checker::SpellChecker;
use crate::config::ServerConfig;
use crate::gate::EngineGate;
use crate::handlers::{AppState, check_handler};

/// Spellgate HTTP server
pub struct SpellServer<E> {
    config: ServerConfig,
    checker: SpellChecker<E>,
}

impl<E: SpellEngine> SpellServer<E> {
    /// Take ownership of an initialized engine.
    pub fn new(config: ServerConfig, engine: E) -> Self {
        Self {
            config,
            checker: SpellChecker::new(EngineGate::new(engine)),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn checker(&self) -> &SpellChecker<E> {
        &self.checker
    }

    /// Build the Axum router
    pub fn build_router(&self) -> Router {
        let state = Arc::new(AppState::new(
            self.checker.clone(),
            self.config.redirect_url.clone(),
            self.config.max_body_bytes,
        ));

        Router::new()
            .fallback(check_handler::<E>)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve until SIGINT or SIGTERM.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr).await?;
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `shutdown` resolves, then drain in-flight
    /// requests and tear down the engine.
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local = listener.local_addr()?;
        let router = self.build_router();
        info!(addr = %local, "spellgate listening");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await?;

        info!("server stopped");
        self.release_engine();
        Ok(())
    }

    fn release_engine(self) {
        let gate = self.checker.gate().clone();
        drop(self.checker);
        match gate.into_engine() {
            Ok(engine) => {
                drop(engine);
                info!("engine released");
            }
            Err(gate) => warn!(
                waiting = gate.waiting(),
                "engine still referenced at shutdown; released with the last reference"
            ),
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown signal received");
}
