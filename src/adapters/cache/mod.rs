//! In-memory caching layer for employee reads.
//!
//! Uses `moka` for concurrent caching. Invalidation is explicit and driven by
//! the employee service; no entry expires on its own unless configured to.

pub mod moka_employee_cache;

pub use moka_employee_cache::MokaEmployeeCache;
