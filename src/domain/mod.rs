//! Domain layer for the Roster employee records service
//!
//! This module contains the employee and catalog models, the port traits
//! adapters implement, and the domain error type.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
