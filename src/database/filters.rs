//! Typed filter parsing for the read endpoints.
//!
//! Each entity exposes an explicit allow-list of query parameters. Anything
//! outside the list is rejected with `UnsupportedFilter` naming the key,
//! before any query reaches the database. Absent keys mean "no constraint".

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::database::models::RequestStatus;
use crate::error::AppError;

fn parse_date(key: &str, value: &str) -> Result<NaiveDate, AppError> {
    value
        .parse::<NaiveDate>()
        .map_err(|_| AppError::BadRequest(format!("Invalid date for '{}': {}", key, value)))
}

fn parse_time(key: &str, value: &str) -> Result<NaiveTime, AppError> {
    value
        .parse::<NaiveTime>()
        .map_err(|_| AppError::BadRequest(format!("Invalid time for '{}': {}", key, value)))
}

fn parse_int(key: &str, value: &str) -> Result<i64, AppError> {
    value
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid number for '{}': {}", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AppError::BadRequest(format!(
            "Invalid boolean for '{}': {}",
            key, value
        ))),
    }
}

/// Filters recognized on `GET /slots`.
#[derive(Debug, Clone, Default)]
pub struct SlotFilter {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_before: Option<NaiveTime>,
    pub start_after: Option<NaiveTime>,
    pub end_before: Option<NaiveTime>,
    pub end_after: Option<NaiveTime>,
    pub slots_amount: Option<i64>,
    pub slots_taken: Option<i64>,
}

impl SlotFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut filter = SlotFilter::default();

        for (key, value) in params {
            match key.as_str() {
                "date" => filter.date = Some(parse_date(key, value)?),
                "start_date" => filter.start_date = Some(parse_date(key, value)?),
                "end_date" => filter.end_date = Some(parse_date(key, value)?),
                "start_before" => filter.start_before = Some(parse_time(key, value)?),
                "start_after" => filter.start_after = Some(parse_time(key, value)?),
                "end_before" => filter.end_before = Some(parse_time(key, value)?),
                "end_after" => filter.end_after = Some(parse_time(key, value)?),
                "slots_amount" => filter.slots_amount = Some(parse_int(key, value)?),
                "slots_taken" => filter.slots_taken = Some(parse_int(key, value)?),
                other => return Err(AppError::UnsupportedFilter(other.to_string())),
            }
        }

        Ok(filter)
    }
}

/// Filters recognized on `GET /assignments`.
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub employee_id: Option<i64>,
}

impl AssignmentFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut filter = AssignmentFilter::default();

        for (key, value) in params {
            match key.as_str() {
                "employee_id" => filter.employee_id = Some(parse_int(key, value)?),
                other => return Err(AppError::UnsupportedFilter(other.to_string())),
            }
        }

        Ok(filter)
    }
}

/// Filters recognized on `GET /requests`.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub employee_id: Option<i64>,
    pub status: Option<RequestStatus>,
}

impl RequestFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut filter = RequestFilter::default();

        for (key, value) in params {
            match key.as_str() {
                "employee_id" => filter.employee_id = Some(parse_int(key, value)?),
                "status" => {
                    filter.status = Some(value.parse::<RequestStatus>().map_err(|_| {
                        AppError::BadRequest(format!("Invalid status for 'status': {}", value))
                    })?)
                }
                other => return Err(AppError::UnsupportedFilter(other.to_string())),
            }
        }

        Ok(filter)
    }
}

/// Filters recognized on `GET /employees`.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub admin: Option<bool>,
}

impl EmployeeFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut filter = EmployeeFilter::default();

        for (key, value) in params {
            match key.as_str() {
                "admin" => filter.admin = Some(parse_bool(key, value)?),
                other => return Err(AppError::UnsupportedFilter(other.to_string())),
            }
        }

        Ok(filter)
    }
}
