//! REST API exposure
//!
//! Consumes the entity registry and produces the Axum `Router`: entity
//! routes nested under `/api`, health checks at the root.

use crate::server::entity_registry::EntityRegistry;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Prefix under which every entity route is mounted
pub const API_PREFIX: &str = "/api";

/// Name reported by the health check
pub const SERVICE_NAME: &str = "petal-pos";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// Returns a router with:
    /// - Health check routes (`/health`, `/healthz`)
    /// - Entity CRUD routes under [`API_PREFIX`]
    /// - Custom routes, merged at the root
    pub fn build_router(registry: &EntityRegistry, custom_routes: Vec<Router>) -> Router {
        let entity_routes = registry.build_routes();

        let mut app = Self::health_routes().nest(API_PREFIX, entity_routes);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": SERVICE_NAME
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_health_routes() {
        let app = RestExposure::build_router(&EntityRegistry::new(), vec![]);
        let server = TestServer::try_new(app).unwrap();

        for path in ["/health", "/healthz"] {
            let response = server.get(path).await;
            response.assert_status_ok();
            response.assert_json(&json!({"status": "ok", "service": "petal-pos"}));
        }
    }

    #[tokio::test]
    async fn test_custom_routes_are_merged() {
        let custom = Router::new().route("/version", get(|| async { "1" }));
        let app = RestExposure::build_router(&EntityRegistry::new(), vec![custom]);
        let server = TestServer::try_new(app).unwrap();

        server.get("/version").await.assert_text("1");
        server.get("/api/unknown").await.assert_status_not_found();
    }
}
