use sqlx::{SqliteConnection, SqlitePool};

use crate::database::filters::EmployeeFilter;
use crate::database::models::{Employee, UpdateEmployeeInput};
use crate::error::AppError;

const EMPLOYEE_COLUMNS: &str = "id, name, email, phone, password_hash, is_admin";

/// Existence check usable inside another operation's transaction.
pub async fn exists(conn: &mut SqliteConnection, employee_id: i64) -> Result<bool, AppError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count > 0)
}

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_employee(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        password_hash: &str,
    ) -> Result<Employee, AppError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "INSERT INTO employees (name, email, phone, password_hash, is_admin) \
             VALUES (?, ?, ?, ?, 0) \
             RETURNING {}",
            EMPLOYEE_COLUMNS
        ))
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE id = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {} FROM employees WHERE email = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    pub async fn find_by_filter(&self, filter: EmployeeFilter) -> Result<Vec<Employee>, AppError> {
        let employees = if let Some(admin) = filter.admin {
            sqlx::query_as::<_, Employee>(&format!(
                "SELECT {} FROM employees WHERE is_admin = ? ORDER BY name",
                EMPLOYEE_COLUMNS
            ))
            .bind(admin)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Employee>(&format!(
                "SELECT {} FROM employees ORDER BY name",
                EMPLOYEE_COLUMNS
            ))
            .fetch_all(&self.pool)
            .await?
        };

        Ok(employees)
    }

    pub async fn update_employee(
        &self,
        id: i64,
        input: UpdateEmployeeInput,
    ) -> Result<Option<Employee>, AppError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let employee = sqlx::query_as::<_, Employee>(&format!(
            "UPDATE employees SET name = ?, email = ?, phone = ? WHERE id = ? RETURNING {}",
            EMPLOYEE_COLUMNS
        ))
        .bind(input.name.unwrap_or(existing.name))
        .bind(input.email.unwrap_or(existing.email))
        .bind(input.phone.or(existing.phone))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn set_admin(&self, id: i64, admin: bool) -> Result<Option<Employee>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "UPDATE employees SET is_admin = ? WHERE id = ? RETURNING {}",
            EMPLOYEE_COLUMNS
        ))
        .bind(admin)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Removes the employee together with their assignments and requests,
    /// handing any reserved seats back to the slots.
    pub async fn delete_employee(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let slot_ids = sqlx::query_scalar::<_, i64>(
            "SELECT slot_id FROM assignments WHERE employee_id = ?",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        for slot_id in slot_ids {
            super::shift_slot::release_slot(&mut *tx, slot_id).await?;
        }

        sqlx::query("DELETE FROM assignments WHERE employee_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM shift_requests WHERE employee_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
