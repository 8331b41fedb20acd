//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - EmployeeRepository: persistence for employee records
//! - CatalogRepository: persistence for employers, skills and projects
//! - EmployeeCache: the read-through cache sitting in front of the employee store

pub mod catalog_repository;
pub mod employee_cache;
pub mod employee_repository;

pub use catalog_repository::CatalogRepository;
pub use employee_cache::{CacheKey, CachedEntry, EmployeeCache};
pub use employee_repository::EmployeeRepository;
