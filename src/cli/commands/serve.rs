//! Implementation of the `roster serve` command.

use anyhow::Result;
use clap::Args;
use std::sync::Arc;
use tracing::{info, warn};

use super::open_database;
use crate::adapters::cache::MokaEmployeeCache;
use crate::adapters::http::{HttpServerConfig, RosterHttpServer};
use crate::adapters::sqlite::{SqliteCatalogRepository, SqliteEmployeeRepository};
use crate::domain::models::Config;
use crate::services::{CatalogService, EmployeeService};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub async fn execute(args: ServeArgs, config: Config) -> Result<()> {
    let pool = open_database(&config).await?;

    let cache = Arc::new(MokaEmployeeCache::from_config(&config.cache));
    let employees = Arc::new(EmployeeService::new(
        Arc::new(SqliteEmployeeRepository::new(pool.clone())),
        cache,
    ));
    let catalog = Arc::new(CatalogService::new(Arc::new(SqliteCatalogRepository::new(
        pool.clone(),
    ))));

    let mut server_config = HttpServerConfig::from(config.server);
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }

    RosterHttpServer::new(employees, catalog, server_config)
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "cannot listen for ctrl-c; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
