//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::exposure::RestExposure;
use crate::entities::register_entities;
use crate::storage::JsonStore;
use anyhow::{Result, anyhow};
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the point-of-sale HTTP server
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(JsonStore::open("db.json").await?);
/// ServerBuilder::new()
///     .with_store(store)
///     .serve("127.0.0.1:3000")
///     .await?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<JsonStore>>,
    entity_registry: EntityRegistry,
    custom_routes: Vec<Router>,
    cors_permissive: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            entity_registry: EntityRegistry::new(),
            custom_routes: Vec::new(),
            cors_permissive: true,
        }
    }

    /// Set the document store backing every entity (required)
    pub fn with_store(mut self, store: Arc<JsonStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Allow any origin, method and header (on by default)
    pub fn with_cors_permissive(mut self, enabled: bool) -> Self {
        self.cors_permissive = enabled;
        self
    }

    /// Add routes that don't fit the CRUD pattern
    ///
    /// They are merged at the root, next to the health checks.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router with tracing and CORS layers applied
    pub fn build(mut self) -> Result<Router> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow!("JsonStore is required. Call .with_store()"))?;

        register_entities(&mut self.entity_registry, store);
        tracing::debug!(resources = ?self.entity_registry.plurals(), "building REST routes");
        let app = RestExposure::build_router(&self.entity_registry, self.custom_routes);

        let cors = if self.cors_permissive {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
        };

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C). The document is flushed one
    /// last time once the server has stopped.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `signal` completes
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, signal: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let store = self.store.clone();
        let app = self.build()?;

        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await?;

        if let Some(store) = store {
            store.close().await?;
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
