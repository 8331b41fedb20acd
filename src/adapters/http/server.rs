//! Roster HTTP server.

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::{catalog, employees};
use crate::domain::models::ServerConfig;
use crate::domain::ports::{CatalogRepository, EmployeeCache, EmployeeRepository};
use crate::services::{CatalogService, EmployeeService};

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        ServerConfig::default().into()
    }
}

impl From<ServerConfig> for HttpServerConfig {
    fn from(config: ServerConfig) -> Self {
        Self {
            host: config.host,
            port: config.port,
            enable_cors: config.enable_cors,
        }
    }
}

impl HttpServerConfig {
    fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// Assemble every route behind the trace layer and, optionally, permissive CORS.
pub fn build_router<R, C, K>(
    employee_service: Arc<EmployeeService<R, C>>,
    catalog_service: Arc<CatalogService<K>>,
    enable_cors: bool,
) -> Router
where
    R: EmployeeRepository + 'static,
    C: EmployeeCache + 'static,
    K: CatalogRepository + 'static,
{
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(employees::routes(employee_service))
        .merge(catalog::routes(catalog_service));

    if enable_cors {
        app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

async fn health_check() -> &'static str {
    "OK"
}

pub struct RosterHttpServer<R, C, K>
where
    R: EmployeeRepository + 'static,
    C: EmployeeCache + 'static,
    K: CatalogRepository + 'static,
{
    config: HttpServerConfig,
    employees: Arc<EmployeeService<R, C>>,
    catalog: Arc<CatalogService<K>>,
}

impl<R, C, K> RosterHttpServer<R, C, K>
where
    R: EmployeeRepository + 'static,
    C: EmployeeCache + 'static,
    K: CatalogRepository + 'static,
{
    pub fn new(
        employees: Arc<EmployeeService<R, C>>,
        catalog: Arc<CatalogService<K>>,
        config: HttpServerConfig,
    ) -> Self {
        Self { config, employees, catalog }
    }

    fn into_router(self) -> Router {
        build_router(self.employees, self.catalog, self.config.enable_cors)
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.socket_addr()?;
        let router = self.into_router();

        tracing::info!("Roster HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("Roster HTTP server stopped");
        Ok(())
    }
}
