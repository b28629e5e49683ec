use actix_web::{web, HttpResponse};

use crate::auth::{Claims, LoginRequest, RegisterRequest};
use crate::database::models::EmployeeInfo;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::AppState;

pub async fn register(
    state: web::Data<AppState>,
    input: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .auth_service
        .register(input.into_inner())
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}

pub async fn login(
    state: web::Data<AppState>,
    input: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.auth_service.login(input.into_inner()).await.map_err(|e| {
        log::warn!("Login failed: {}", e);
        AppError::Unauthorized
    })?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

pub async fn me(state: web::Data<AppState>, claims: Claims) -> Result<HttpResponse, AppError> {
    let employee = state
        .auth_service
        .get_employee_from_claims(&claims)
        .await
        .map_err(|_| AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(EmployeeInfo::from(employee))))
}
