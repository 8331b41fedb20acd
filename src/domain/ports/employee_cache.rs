//! Employee cache port.
//!
//! One logical cache holding two key shapes: a per-record entry for every
//! employee read by id, and a single collection entry for the full listing.
//! The two shapes are not kept in sync with each other; callers decide what
//! to evict after each mutation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::models::Employee;

/// Key into the employee cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// A single employee, by id.
    Employee(i64),
    /// The full employee listing.
    AllEmployees,
}

/// Value stored under a [`CacheKey`].
#[derive(Debug, Clone)]
pub enum CachedEntry {
    Employee(Arc<Employee>),
    Employees(Arc<Vec<Employee>>),
}

/// Key/value cache with explicit invalidation.
///
/// Reads and writes are atomic per key; nothing is atomic across keys.
#[async_trait]
pub trait EmployeeCache: Send + Sync {
    /// Cached value for `key`, if any.
    async fn lookup(&self, key: &CacheKey) -> Option<CachedEntry>;

    /// Insert or overwrite the value for `key`.
    async fn store(&self, key: CacheKey, entry: CachedEntry);

    /// Remove a single entry.
    async fn evict(&self, key: &CacheKey);

    /// Remove every entry regardless of key shape.
    async fn evict_all(&self);
}
