//! REST adapter: axum routes over the employee and catalog services.

pub mod catalog;
pub mod employees;
pub mod error;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{build_router, HttpServerConfig, RosterHttpServer};
