//! Assignment store: the consistency engine binding employees to slots.
//!
//! Every mutation here runs inside a single transaction so the capacity
//! counter, the assignment row, and the matching request row move together
//! or not at all. Sub-steps take the caller's connection, which lets the
//! swap protocol reuse the exact create/delete cycles the standalone
//! operations use.

use sqlx::{SqliteConnection, SqlitePool};

use crate::database::filters::AssignmentFilter;
use crate::database::models::{Assignment, AssignmentDetail};
use crate::database::repositories::{employee, shift_request, shift_slot};
use crate::error::{AppError, SwapStep};

const ASSIGNMENT_COLUMNS: &str = "id, employee_id, slot_id";

async fn find_in_tx(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<Assignment>, AppError> {
    let assignment = sqlx::query_as::<_, Assignment>(&format!(
        "SELECT {} FROM assignments WHERE id = ?",
        ASSIGNMENT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(assignment)
}

/// One create cycle: existence checks, seat reservation, duplicate check,
/// request approval, row insert. Reservation happens before the row is
/// written; any later failure rolls the reservation back with the
/// enclosing transaction.
async fn create_in_tx(
    conn: &mut SqliteConnection,
    employee_id: i64,
    slot_id: i64,
) -> Result<Assignment, AppError> {
    if !employee::exists(&mut *conn, employee_id).await? {
        return Err(AppError::NotFound(format!(
            "Employee {} not found",
            employee_id
        )));
    }

    shift_slot::reserve_slot(&mut *conn, slot_id).await?;

    let duplicate = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM assignments WHERE employee_id = ? AND slot_id = ?",
    )
    .bind(employee_id)
    .bind(slot_id)
    .fetch_one(&mut *conn)
    .await?;
    if duplicate > 0 {
        return Err(AppError::DuplicateAssignment(format!(
            "Employee {} is already assigned to slot {}",
            employee_id, slot_id
        )));
    }

    shift_request::approve_pending_for_assignment(&mut *conn, employee_id, slot_id).await?;

    let assignment = sqlx::query_as::<_, Assignment>(&format!(
        "INSERT INTO assignments (employee_id, slot_id) VALUES (?, ?) RETURNING {}",
        ASSIGNMENT_COLUMNS
    ))
    .bind(employee_id)
    .bind(slot_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(assignment)
}

/// One delete cycle: release the seat (missing slot is already-reconciled,
/// not an error), drop any request for the pair, drop the row.
async fn delete_in_tx(
    conn: &mut SqliteConnection,
    assignment: &Assignment,
) -> Result<(), AppError> {
    shift_slot::release_slot(&mut *conn, assignment.slot_id).await?;
    shift_request::remove_for_assignment(&mut *conn, assignment.employee_id, assignment.slot_id)
        .await?;

    sqlx::query("DELETE FROM assignments WHERE id = ?")
        .bind(assignment.id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

#[derive(Clone)]
pub struct AssignmentRepository {
    pool: SqlitePool,
}

impl AssignmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_assignment(
        &self,
        employee_id: i64,
        slot_id: i64,
    ) -> Result<Assignment, AppError> {
        let mut tx = self.pool.begin().await?;
        let assignment = create_in_tx(&mut *tx, employee_id, slot_id).await?;
        tx.commit().await?;

        log::info!(
            "Created assignment {} (employee {}, slot {})",
            assignment.id,
            employee_id,
            slot_id
        );

        Ok(assignment)
    }

    /// One-shot state transition: a second delete of the same id fails with
    /// `NotFound` and does not touch the slot counter again.
    pub async fn delete_assignment(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let assignment = find_in_tx(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id)))?;

        delete_in_tx(&mut *tx, &assignment).await?;
        tx.commit().await?;

        log::info!("Deleted assignment {}", id);

        Ok(true)
    }

    pub async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>, AppError> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {} FROM assignments WHERE id = ?",
            ASSIGNMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn find_by_filter(
        &self,
        filter: AssignmentFilter,
    ) -> Result<Vec<AssignmentDetail>, AppError> {
        let mut sql = String::from(
            "SELECT a.id, a.employee_id, a.slot_id, \
                    s.shift_date, s.start_time, s.end_time, \
                    e.name AS employee_name, e.email AS employee_email \
             FROM assignments a \
             JOIN shift_slots s ON s.id = a.slot_id \
             JOIN employees e ON e.id = a.employee_id",
        );

        if filter.employee_id.is_some() {
            sql.push_str(" WHERE a.employee_id = ?");
        }
        sql.push_str(" ORDER BY a.id");

        let mut query = sqlx::query_as::<_, AssignmentDetail>(&sql);
        if let Some(employee_id) = filter.employee_id {
            query = query.bind(employee_id);
        }

        let assignments = query.fetch_all(&self.pool).await?;

        Ok(assignments)
    }

    /// Exchanges the slots of two assignments.
    ///
    /// The four sub-steps (two deletes, two creates) share one transaction,
    /// so a failure rolls everything back and both originals survive. The
    /// error still names the failed sub-step as `SwapFailed` so a caller can
    /// tell a broken compound operation from a plain missing id.
    pub async fn swap_assignments(
        &self,
        id1: i64,
        id2: i64,
    ) -> Result<(Assignment, Assignment), AppError> {
        if id1 == id2 {
            return Err(AppError::BadRequest(
                "Cannot swap an assignment with itself".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let first = find_in_tx(&mut *tx, id1)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id1)))?;
        let second = find_in_tx(&mut *tx, id2)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id2)))?;

        // Validate both target pairs before anything is deleted: a swap that
        // would collide with a third assignment is rejected up front.
        for (employee_id, slot_id) in [
            (first.employee_id, second.slot_id),
            (second.employee_id, first.slot_id),
        ] {
            let collision = sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM assignments \
                 WHERE employee_id = ? AND slot_id = ? AND id NOT IN (?, ?)",
            )
            .bind(employee_id)
            .bind(slot_id)
            .bind(first.id)
            .bind(second.id)
            .fetch_one(&mut *tx)
            .await?;

            if collision > 0 {
                return Err(AppError::swap_failed(
                    SwapStep::ValidatingTargets,
                    AppError::DuplicateAssignment(format!(
                        "Employee {} is already assigned to slot {}",
                        employee_id, slot_id
                    )),
                ));
            }
        }

        delete_in_tx(&mut *tx, &first)
            .await
            .map_err(|e| AppError::swap_failed(SwapStep::DeletingFirst, e))?;
        delete_in_tx(&mut *tx, &second)
            .await
            .map_err(|e| AppError::swap_failed(SwapStep::DeletingSecond, e))?;

        let crossed_first = create_in_tx(&mut *tx, first.employee_id, second.slot_id)
            .await
            .map_err(|e| AppError::swap_failed(SwapStep::CreatingFirst, e))?;
        let crossed_second = create_in_tx(&mut *tx, second.employee_id, first.slot_id)
            .await
            .map_err(|e| AppError::swap_failed(SwapStep::CreatingSecond, e))?;

        tx.commit().await?;

        log::info!(
            "Swapped assignments {} and {} -> {} and {}",
            id1,
            id2,
            crossed_first.id,
            crossed_second.id
        );

        Ok((crossed_first, crossed_second))
    }
}
