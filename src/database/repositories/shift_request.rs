//! Shift request persistence and the reconciliation transitions the
//! assignment store drives.
//!
//! The lifecycle rule is easy to get wrong: creating an assignment APPROVES
//! a matching pending request, deleting an assignment DELETES the matching
//! request outright (it no longer represents an actionable pending state).
//! Both transitions are named functions here so they can be exercised
//! without going through the assignment paths.

use sqlx::{SqliteConnection, SqlitePool};

use crate::database::filters::RequestFilter;
use crate::database::models::{
    RequestStatus, ShiftRequest, ShiftRequestDetail, ShiftRequestInput, UpdateShiftRequestInput,
};
use crate::error::AppError;

const REQUEST_COLUMNS: &str = "id, employee_id, slot_id, status, notes";

/// Assignment created for a pair the employee had already requested:
/// pending -> approved. Returns whether a request was transitioned.
pub async fn approve_pending_for_assignment(
    conn: &mut SqliteConnection,
    employee_id: i64,
    slot_id: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE shift_requests SET status = ? \
         WHERE employee_id = ? AND slot_id = ? AND status = ?",
    )
    .bind(RequestStatus::Approved)
    .bind(employee_id)
    .bind(slot_id)
    .bind(RequestStatus::Pending)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Assignment deleted: any request for the same pair is removed, not denied.
pub async fn remove_for_assignment(
    conn: &mut SqliteConnection,
    employee_id: i64,
    slot_id: i64,
) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM shift_requests WHERE employee_id = ? AND slot_id = ?")
        .bind(employee_id)
        .bind(slot_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

#[derive(Clone)]
pub struct ShiftRequestRepository {
    pool: SqlitePool,
}

impl ShiftRequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_request(&self, input: ShiftRequestInput) -> Result<ShiftRequest, AppError> {
        let mut tx = self.pool.begin().await?;

        if !super::employee::exists(&mut *tx, input.employee_id).await? {
            return Err(AppError::NotFound(format!(
                "Employee {} not found",
                input.employee_id
            )));
        }

        let slot_exists =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shift_slots WHERE id = ?")
                .bind(input.slot_id)
                .fetch_one(&mut *tx)
                .await?;
        if slot_exists == 0 {
            return Err(AppError::NotFound(format!(
                "Shift slot {} not found",
                input.slot_id
            )));
        }

        let pending = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM shift_requests \
             WHERE employee_id = ? AND slot_id = ? AND status = ?",
        )
        .bind(input.employee_id)
        .bind(input.slot_id)
        .bind(RequestStatus::Pending)
        .fetch_one(&mut *tx)
        .await?;
        if pending > 0 {
            return Err(AppError::BadRequest(format!(
                "Employee {} already has a pending request for slot {}",
                input.employee_id, input.slot_id
            )));
        }

        let request = sqlx::query_as::<_, ShiftRequest>(&format!(
            "INSERT INTO shift_requests (employee_id, slot_id, status, notes) \
             VALUES (?, ?, ?, ?) \
             RETURNING {}",
            REQUEST_COLUMNS
        ))
        .bind(input.employee_id)
        .bind(input.slot_id)
        .bind(RequestStatus::Pending)
        .bind(input.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(request)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ShiftRequest>, AppError> {
        let request = sqlx::query_as::<_, ShiftRequest>(&format!(
            "SELECT {} FROM shift_requests WHERE id = ?",
            REQUEST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_by_filter(
        &self,
        filter: RequestFilter,
    ) -> Result<Vec<ShiftRequestDetail>, AppError> {
        let mut sql = String::from(
            "SELECT r.id, r.employee_id, r.slot_id, r.status, r.notes, \
                    s.shift_date, s.start_time, s.end_time, \
                    e.name AS employee_name, e.email AS employee_email \
             FROM shift_requests r \
             JOIN shift_slots s ON s.id = r.slot_id \
             JOIN employees e ON e.id = r.employee_id",
        );
        let mut conditions: Vec<&str> = Vec::new();

        if filter.employee_id.is_some() {
            conditions.push("r.employee_id = ?");
        }
        if filter.status.is_some() {
            conditions.push("r.status = ?");
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY r.id");

        let mut query = sqlx::query_as::<_, ShiftRequestDetail>(&sql);
        if let Some(employee_id) = filter.employee_id {
            query = query.bind(employee_id);
        }
        if let Some(status) = filter.status {
            query = query.bind(status);
        }

        let requests = query.fetch_all(&self.pool).await?;

        Ok(requests)
    }

    /// Direct status/notes edit. Deliberately has no side effects on
    /// assignments: approving a request here does not create one.
    pub async fn update_request(
        &self,
        id: i64,
        input: UpdateShiftRequestInput,
    ) -> Result<Option<ShiftRequest>, AppError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let request = sqlx::query_as::<_, ShiftRequest>(&format!(
            "UPDATE shift_requests SET status = ?, notes = ? WHERE id = ? RETURNING {}",
            REQUEST_COLUMNS
        ))
        .bind(input.status.unwrap_or(existing.status))
        .bind(input.notes.or(existing.notes))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn delete_request(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM shift_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
