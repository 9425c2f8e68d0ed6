//! Employee service for business logic.

use tracing::{info, instrument};

use super::EmployeeError;
use super::models::{Employee, NewEmployee, UpdateEmployee};
use super::repository::EmployeeRepository;

/// Service for employee management operations.
#[derive(Debug, Clone)]
pub struct EmployeeService {
    repo: EmployeeRepository,
}

impl EmployeeService {
    /// Create a new employee service.
    pub fn new(repo: EmployeeRepository) -> Self {
        Self { repo }
    }

    /// Create an employee.
    ///
    /// The email lookup is a fast path; the unique constraint on the insert
    /// remains the authority under concurrency.
    #[instrument(skip(self, new), fields(email = %new.email))]
    pub async fn create(&self, new: NewEmployee) -> Result<Employee, EmployeeError> {
        if self.repo.get_by_email(&new.email).await?.is_some() {
            return Err(EmployeeError::DuplicateEmail);
        }

        let employee = self.repo.create(new).await?;
        info!(employee_id = employee.id, "Created employee");

        Ok(employee)
    }

    /// List all employees, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        self.repo.list().await
    }

    /// Get an employee by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Employee>, EmployeeError> {
        self.repo.get(id).await
    }

    /// Update an employee; only provided fields change.
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i64, update: UpdateEmployee) -> Result<Employee, EmployeeError> {
        let employee = self.repo.update(id, update).await?;
        info!(employee_id = id, "Updated employee");

        Ok(employee)
    }

    /// Delete an employee.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), EmployeeError> {
        self.repo.delete(id).await?;
        info!(employee_id = id, "Deleted employee");

        Ok(())
    }
}
