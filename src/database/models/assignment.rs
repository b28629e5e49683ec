use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A confirmed binding of one employee to one shift slot.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Assignment {
    pub id: i64,
    pub employee_id: i64,
    pub slot_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentInput {
    pub employee_id: i64,
    pub slot_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInput {
    pub assignment_id_1: i64,
    pub assignment_id_2: i64,
}

/// Assignment listing row with slot and employee fields joined in for display.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AssignmentDetail {
    pub id: i64,
    pub employee_id: i64,
    pub slot_id: i64,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub employee_name: String,
    pub employee_email: String,
}
