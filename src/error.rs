use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::handlers::shared::ApiResponse;

/// Sub-steps of the assignment swap, recorded so a failed swap reports how
/// far it got before the transaction rolled back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStep {
    ValidatingTargets,
    DeletingFirst,
    DeletingSecond,
    CreatingFirst,
    CreatingSecond,
}

impl std::fmt::Display for SwapStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapStep::ValidatingTargets => write!(f, "validating target slots"),
            SwapStep::DeletingFirst => write!(f, "deleting first assignment"),
            SwapStep::DeletingSecond => write!(f, "deleting second assignment"),
            SwapStep::CreatingFirst => write!(f, "creating first crossed assignment"),
            SwapStep::CreatingSecond => write!(f, "creating second crossed assignment"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate assignment: {0}")]
    DuplicateAssignment(String),

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Unsupported filter parameter: {0}")]
    UnsupportedFilter(String),

    #[error("Swap failed while {step}: {source}")]
    SwapFailed {
        step: SwapStep,
        #[source]
        source: Box<AppError>,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error{}", .0.as_ref().map_or("".to_string(), |s| format!(": {}", s)))]
    InternalServerError(Option<String>),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateAssignment(_) => StatusCode::BAD_REQUEST,
            AppError::CapacityExceeded(_) => StatusCode::CONFLICT,
            AppError::UnsupportedFilter(_) => StatusCode::BAD_REQUEST,
            AppError::SwapFailed { .. } => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        log::error!(
            "Request failed with status {}: {}",
            status_code,
            error_message
        );

        let response_body = ApiResponse::<()>::error(&error_message);

        HttpResponse::build(status_code).json(response_body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        log::error!("Database error: {}", error);
        AppError::DatabaseError(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        log::error!("Anyhow error: {}", error);

        if error.is::<sqlx::Error>() {
            match error.downcast::<sqlx::Error>() {
                Ok(sqlx_err) => return AppError::DatabaseError(sqlx_err),
                Err(original_error) => {
                    return AppError::InternalServerError(Some(original_error.to_string()));
                }
            }
        }

        AppError::InternalServerError(Some(error.to_string()))
    }
}

impl AppError {
    pub fn swap_failed(step: SwapStep, source: AppError) -> Self {
        AppError::SwapFailed {
            step,
            source: Box::new(source),
        }
    }
}
