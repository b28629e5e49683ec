use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use crate::auth::Claims;
use crate::database::filters::RequestFilter;
use crate::database::models::{ShiftRequestInput, UpdateShiftRequestInput};
use crate::database::repositories::ShiftRequestRepository;
use crate::error::AppError;
use crate::handlers::{require_admin, shared::ApiResponse};

pub async fn create_request(
    repo: web::Data<ShiftRequestRepository>,
    input: web::Json<ShiftRequestInput>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    let input = input.into_inner();
    if !claims.is_admin() && claims.employee_id().map_err(AppError::from)? != input.employee_id {
        return Err(AppError::Forbidden(
            "Cannot request a shift for another employee".to_string(),
        ));
    }

    let request = repo.create_request(input).await?;
    log::info!("Created shift request {}", request.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(request)))
}

pub async fn get_requests(
    repo: web::Data<ShiftRequestRepository>,
    query: web::Query<HashMap<String, String>>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    let mut filter = RequestFilter::from_params(&query)?;

    // Non-admin callers only see their own requests.
    if !claims.is_admin() {
        filter.employee_id = Some(claims.employee_id().map_err(AppError::from)?);
    }

    let requests = repo.find_by_filter(filter).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(requests)))
}

pub async fn get_request(
    repo: web::Data<ShiftRequestRepository>,
    path: web::Path<i64>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let request = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shift request {} not found", id)))?;

    if !claims.is_admin() && claims.employee_id().map_err(AppError::from)? != request.employee_id
    {
        return Err(AppError::Forbidden(
            "Cannot view another employee's request".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(request)))
}

/// Direct status/notes edit; approving here never creates an assignment.
pub async fn update_request(
    repo: web::Data<ShiftRequestRepository>,
    path: web::Path<i64>,
    input: web::Json<UpdateShiftRequestInput>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let id = path.into_inner();
    let request = repo
        .update_request(id, input.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shift request {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(request)))
}

pub async fn delete_request(
    repo: web::Data<ShiftRequestRepository>,
    path: web::Path<i64>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    if !claims.is_admin() {
        let request = repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shift request {} not found", id)))?;
        if claims.employee_id().map_err(AppError::from)? != request.employee_id {
            return Err(AppError::Forbidden(
                "Cannot delete another employee's request".to_string(),
            ));
        }
    }

    if !repo.delete_request(id).await? {
        return Err(AppError::NotFound(format!("Shift request {} not found", id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Shift request deleted",
    )))
}
