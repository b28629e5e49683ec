use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A schedulable shift window with a bounded number of seats.
///
/// `slots_taken` is denormalized: it must always equal the number of live
/// assignments referencing this slot. Only the capacity ledger functions in
/// `repositories::shift_slot` may change it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShiftSlot {
    pub id: i64,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slots_amount: i64,
    pub slots_taken: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShiftSlotInput {
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slots_amount: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateShiftSlotInput {
    pub shift_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub slots_amount: Option<i64>,
}
