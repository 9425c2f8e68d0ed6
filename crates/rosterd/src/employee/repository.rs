//! Employee repository for database operations.

use anyhow::Context;
use sqlx::SqlitePool;
use tracing::instrument;

use super::EmployeeError;
use super::models::{CourseList, Employee, NewEmployee, UpdateEmployee};
use crate::db::is_unique_violation;

const EMPLOYEE_COLUMNS: &str =
    "id, name, email, mobile, designation, gender, course, image, created_at, updated_at";

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Create a new employee repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new employee. The unique email constraint is the authority
    /// on duplicates.
    #[instrument(skip(self, new), fields(email = %new.email))]
    pub async fn create(&self, new: NewEmployee) -> Result<Employee, EmployeeError> {
        let course_json = CourseList(new.course.clone()).to_json();

        let result = sqlx::query(
            r#"
            INSERT INTO employees (name, email, mobile, designation, gender, course, image)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.mobile)
        .bind(&new.designation)
        .bind(&new.gender)
        .bind(&course_json)
        .bind(&new.image)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_rowid();
                self.get(id).await?.ok_or_else(|| {
                    EmployeeError::Storage(anyhow::anyhow!("employee not found after insert"))
                })
            }
            Err(e) if is_unique_violation(&e) => Err(EmployeeError::DuplicateEmail),
            Err(e) => Err(EmployeeError::Storage(
                anyhow::Error::new(e).context("inserting employee"),
            )),
        }
    }

    /// Get an employee by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Employee>, EmployeeError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?");
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("fetching employee")?;

        Ok(employee)
    }

    /// Get an employee by email.
    #[instrument(skip(self))]
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Employee>, EmployeeError> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE email = ?");
        let employee = sqlx::query_as::<_, Employee>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .context("fetching employee by email")?;

        Ok(employee)
    }

    /// List all employees, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Employee>, EmployeeError> {
        let sql =
            format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY created_at DESC, id DESC");
        let employees = sqlx::query_as::<_, Employee>(&sql)
            .fetch_all(&self.pool)
            .await
            .context("listing employees")?;

        Ok(employees)
    }

    /// Update an employee. Only provided fields change.
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i64, update: UpdateEmployee) -> Result<Employee, EmployeeError> {
        let existing = self.get(id).await?.ok_or(EmployeeError::NotFound)?;

        // Build update query dynamically
        let mut updates: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(name) = &update.name {
            updates.push("name = ?");
            values.push(name.clone());
        }

        if let Some(email) = &update.email {
            updates.push("email = ?");
            values.push(email.clone());
        }

        if let Some(mobile) = &update.mobile {
            updates.push("mobile = ?");
            values.push(mobile.clone());
        }

        if let Some(designation) = &update.designation {
            updates.push("designation = ?");
            values.push(designation.clone());
        }

        if let Some(gender) = &update.gender {
            updates.push("gender = ?");
            values.push(gender.clone());
        }

        if let Some(course) = &update.course {
            updates.push("course = ?");
            values.push(CourseList(course.clone()).to_json());
        }

        if let Some(image) = &update.image {
            updates.push("image = ?");
            values.push(image.clone());
        }

        if updates.is_empty() {
            return Ok(existing);
        }

        updates.push("updated_at = datetime('now')");

        let sql = format!("UPDATE employees SET {} WHERE id = ?", updates.join(", "));

        let mut query_builder = sqlx::query(&sql);
        for value in &values {
            query_builder = query_builder.bind(value);
        }
        query_builder = query_builder.bind(id);

        match query_builder.execute(&self.pool).await {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(EmployeeError::DuplicateEmail),
            Err(e) => {
                return Err(EmployeeError::Storage(
                    anyhow::Error::new(e).context("updating employee"),
                ));
            }
        }

        self.get(id).await?.ok_or(EmployeeError::NotFound)
    }

    /// Delete an employee.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), EmployeeError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("deleting employee")?;

        if result.rows_affected() == 0 {
            return Err(EmployeeError::NotFound);
        }

        Ok(())
    }
}
