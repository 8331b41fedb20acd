//! Domain models for Roster.

pub mod catalog;
pub mod config;
pub mod employee;

pub use catalog::{
    Employer, NewCatalogEntry, NewProject, Project, ProjectStatus, ProjectSummary, Skill,
};
pub use config::{CacheConfig, Config, DatabaseConfig, LoggingConfig, ServerConfig};
pub use employee::{Employee, EmployeeDetails, EmployeePatch, EntityRef};
