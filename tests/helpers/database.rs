#![allow(dead_code)]

use chrono::Utc;
use roster::adapters::sqlite::{create_migrated_test_pool, SqliteCatalogRepository};
use roster::domain::models::{NewCatalogEntry, NewProject};
use roster::domain::ports::CatalogRepository;
use sqlx::SqlitePool;

/// Create an in-memory SQLite database for testing
///
/// Creates a fresh in-memory database with migrations applied.
/// Each call creates a completely isolated database instance.
pub async fn setup_test_db() -> SqlitePool {
    create_migrated_test_pool()
        .await
        .expect("failed to create test database")
}

/// Teardown test database
///
/// Closes the connection pool and cleans up resources.
pub async fn teardown_test_db(pool: SqlitePool) {
    pool.close().await;
}

/// Ids of the catalog rows created by [`seed_catalog`].
#[derive(Debug, Clone, Copy)]
pub struct SeededCatalog {
    pub employer: i64,
    pub rust: i64,
    pub sql: i64,
    pub project: i64,
}

/// Insert one employer, two skills and one project.
pub async fn seed_catalog(pool: &SqlitePool) -> SeededCatalog {
    let repo = SqliteCatalogRepository::new(pool.clone());
    let employer = repo.create_employer(&NewCatalogEntry::new("Acme")).await.unwrap();
    let rust = repo.create_skill(&NewCatalogEntry::new("Rust")).await.unwrap();
    let sql = repo.create_skill(&NewCatalogEntry::new("SQL")).await.unwrap();
    let project = repo
        .create_project(&NewProject::new("Apollo", Utc::now()))
        .await
        .unwrap();

    SeededCatalog {
        employer: employer.id,
        rust: rust.id,
        sql: sql.id,
        project: project.id,
    }
}
