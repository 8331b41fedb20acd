//! Infrastructure layer module
//!
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Project setup for `roster init`

pub mod config;
pub mod logging;
pub mod setup;
