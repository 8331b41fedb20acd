pub mod catalog_service;
pub mod employee_service;

pub use catalog_service::CatalogService;
pub use employee_service::EmployeeService;
