//! Employee records and CRUD operations.

pub mod models;
mod repository;
mod service;

pub use models::{CourseList, Employee, NewEmployee, UpdateEmployee};
pub use repository::EmployeeRepository;
pub use service::EmployeeService;

/// Domain errors for employee operations.
#[derive(Debug, thiserror::Error)]
pub enum EmployeeError {
    /// Email already used by another employee.
    #[error("email already exists")]
    DuplicateEmail,

    /// No employee with the given id.
    #[error("employee not found")]
    NotFound,

    /// Storage failure.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
