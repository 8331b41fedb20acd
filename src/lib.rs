//! Roster - employee records service
//!
//! A REST and CLI front end over a SQLite store, with a read-through,
//! write-invalidate cache in front of employee reads.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Service Layer** (`services`): cache and store orchestration
//! - **Adapters** (`adapters`): SQLite repositories, the moka cache, the axum API
//! - **Infrastructure Layer** (`infrastructure`): configuration, logging, setup
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use roster::adapters::cache::MokaEmployeeCache;
//! use roster::adapters::sqlite::{initialize_database, SqliteEmployeeRepository};
//! use roster::services::EmployeeService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = initialize_database("sqlite:.roster/roster.db", None).await?;
//!     let service = EmployeeService::new(
//!         Arc::new(SqliteEmployeeRepository::new(pool)),
//!         Arc::new(MokaEmployeeCache::new()),
//!     );
//!     println!("{} employees", service.list_employees().await?.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    CacheConfig, Config, DatabaseConfig, Employee, EmployeeDetails, EmployeePatch, Employer,
    EntityRef, LoggingConfig, Project, ProjectStatus, ServerConfig, Skill,
};
pub use domain::ports::{CacheKey, CachedEntry, CatalogRepository, EmployeeCache, EmployeeRepository};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CatalogService, EmployeeService};
