//! Shift slot persistence and the capacity ledger.
//!
//! `reserve_slot` and `release_slot` are the only code paths that touch
//! `slots_taken`. Multi-step operations call them on their own transaction
//! so the counter and the assignment rows move together.

use sqlx::{SqliteConnection, SqlitePool};

use crate::database::filters::SlotFilter;
use crate::database::models::{ShiftSlot, ShiftSlotInput, UpdateShiftSlotInput};
use crate::error::AppError;

const SLOT_COLUMNS: &str = "id, shift_date, start_time, end_time, slots_amount, slots_taken";

/// Take one seat in the slot. Fails with `NotFound` if the slot does not
/// exist and `CapacityExceeded` if every seat is taken. The guard lives in
/// the UPDATE itself so the check and the increment are a single statement.
pub async fn reserve_slot(conn: &mut SqliteConnection, slot_id: i64) -> Result<ShiftSlot, AppError> {
    let updated = sqlx::query_as::<_, ShiftSlot>(&format!(
        "UPDATE shift_slots SET slots_taken = slots_taken + 1 \
         WHERE id = ? AND slots_taken < slots_amount \
         RETURNING {}",
        SLOT_COLUMNS
    ))
    .bind(slot_id)
    .fetch_optional(&mut *conn)
    .await?;

    match updated {
        Some(slot) => Ok(slot),
        None => {
            let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shift_slots WHERE id = ?")
                .bind(slot_id)
                .fetch_one(&mut *conn)
                .await?;

            if exists == 0 {
                Err(AppError::NotFound(format!("Shift slot {} not found", slot_id)))
            } else {
                Err(AppError::CapacityExceeded(format!(
                    "Shift slot {} has no remaining capacity",
                    slot_id
                )))
            }
        }
    }
}

/// Give one seat back. The decrement clamps at zero so a double release can
/// never drive the counter negative, and a missing slot is treated as
/// already reconciled (slot deletion cascades elsewhere), not an error.
pub async fn release_slot(conn: &mut SqliteConnection, slot_id: i64) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE shift_slots SET slots_taken = CASE WHEN slots_taken > 0 THEN slots_taken - 1 ELSE 0 END \
         WHERE id = ?",
    )
    .bind(slot_id)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[derive(Clone)]
pub struct ShiftSlotRepository {
    pool: SqlitePool,
}

impl ShiftSlotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_slot(&self, input: ShiftSlotInput) -> Result<ShiftSlot, AppError> {
        if input.slots_amount < 1 {
            return Err(AppError::BadRequest(
                "slots_amount must be at least 1".to_string(),
            ));
        }

        let slot = sqlx::query_as::<_, ShiftSlot>(&format!(
            "INSERT INTO shift_slots (shift_date, start_time, end_time, slots_amount, slots_taken) \
             VALUES (?, ?, ?, ?, 0) \
             RETURNING {}",
            SLOT_COLUMNS
        ))
        .bind(input.shift_date)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(input.slots_amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(slot)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ShiftSlot>, AppError> {
        let slot = sqlx::query_as::<_, ShiftSlot>(&format!(
            "SELECT {} FROM shift_slots WHERE id = ?",
            SLOT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }

    pub async fn find_by_filter(&self, filter: SlotFilter) -> Result<Vec<ShiftSlot>, AppError> {
        let mut sql = format!("SELECT {} FROM shift_slots", SLOT_COLUMNS);
        let mut conditions: Vec<&str> = Vec::new();

        if filter.date.is_some() {
            conditions.push("shift_date = ?");
        }
        if filter.start_date.is_some() {
            conditions.push("shift_date >= ?");
        }
        if filter.end_date.is_some() {
            conditions.push("shift_date <= ?");
        }
        if filter.start_before.is_some() {
            conditions.push("start_time < ?");
        }
        if filter.start_after.is_some() {
            conditions.push("start_time > ?");
        }
        if filter.end_before.is_some() {
            conditions.push("end_time < ?");
        }
        if filter.end_after.is_some() {
            conditions.push("end_time > ?");
        }
        if filter.slots_amount.is_some() {
            conditions.push("slots_amount = ?");
        }
        if filter.slots_taken.is_some() {
            conditions.push("slots_taken = ?");
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY shift_date, start_time");

        // Bind order must mirror the condition order above.
        let mut query = sqlx::query_as::<_, ShiftSlot>(&sql);
        if let Some(date) = filter.date {
            query = query.bind(date);
        }
        if let Some(start_date) = filter.start_date {
            query = query.bind(start_date);
        }
        if let Some(end_date) = filter.end_date {
            query = query.bind(end_date);
        }
        if let Some(start_before) = filter.start_before {
            query = query.bind(start_before);
        }
        if let Some(start_after) = filter.start_after {
            query = query.bind(start_after);
        }
        if let Some(end_before) = filter.end_before {
            query = query.bind(end_before);
        }
        if let Some(end_after) = filter.end_after {
            query = query.bind(end_after);
        }
        if let Some(slots_amount) = filter.slots_amount {
            query = query.bind(slots_amount);
        }
        if let Some(slots_taken) = filter.slots_taken {
            query = query.bind(slots_taken);
        }

        let slots = query.fetch_all(&self.pool).await?;

        Ok(slots)
    }

    pub async fn update_slot(
        &self,
        id: i64,
        input: UpdateShiftSlotInput,
    ) -> Result<Option<ShiftSlot>, AppError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(slots_amount) = input.slots_amount {
            if slots_amount < existing.slots_taken {
                return Err(AppError::BadRequest(format!(
                    "slots_amount {} is below the {} seats already taken",
                    slots_amount, existing.slots_taken
                )));
            }
        }

        let slot = sqlx::query_as::<_, ShiftSlot>(&format!(
            "UPDATE shift_slots \
             SET shift_date = ?, start_time = ?, end_time = ?, slots_amount = ? \
             WHERE id = ? \
             RETURNING {}",
            SLOT_COLUMNS
        ))
        .bind(input.shift_date.unwrap_or(existing.shift_date))
        .bind(input.start_time.unwrap_or(existing.start_time))
        .bind(input.end_time.unwrap_or(existing.end_time))
        .bind(input.slots_amount.unwrap_or(existing.slots_amount))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(slot)
    }

    /// Deletes the slot along with its assignments and requests, so no
    /// dangling rows keep referencing a slot that no longer exists.
    pub async fn delete_slot(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM assignments WHERE slot_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM shift_requests WHERE slot_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM shift_slots WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
