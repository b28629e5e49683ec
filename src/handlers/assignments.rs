use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use crate::auth::Claims;
use crate::database::filters::AssignmentFilter;
use crate::database::models::{AssignmentInput, SwapInput};
use crate::database::repositories::AssignmentRepository;
use crate::error::AppError;
use crate::handlers::{require_admin, shared::ApiResponse};

pub async fn create_assignment(
    repo: web::Data<AssignmentRepository>,
    input: web::Json<AssignmentInput>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let assignment = repo
        .create_assignment(input.employee_id, input.slot_id)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(assignment)))
}

pub async fn get_assignments(
    repo: web::Data<AssignmentRepository>,
    query: web::Query<HashMap<String, String>>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    let mut filter = AssignmentFilter::from_params(&query)?;

    // Non-admin callers only see their own assignments.
    if !claims.is_admin() {
        filter.employee_id = Some(claims.employee_id().map_err(AppError::from)?);
    }

    let assignments = repo.find_by_filter(filter).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(assignments)))
}

pub async fn get_assignment(
    repo: web::Data<AssignmentRepository>,
    path: web::Path<i64>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let assignment = repo
        .get_assignment_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id)))?;

    if !claims.is_admin()
        && claims.employee_id().map_err(AppError::from)? != assignment.employee_id
    {
        return Err(AppError::Forbidden(
            "Cannot view another employee's assignment".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment)))
}

pub async fn delete_assignment(
    repo: web::Data<AssignmentRepository>,
    path: web::Path<i64>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let id = path.into_inner();
    repo.delete_assignment(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Assignment deleted",
    )))
}

pub async fn swap_assignments(
    repo: web::Data<AssignmentRepository>,
    input: web::Json<SwapInput>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let (first, second) = repo
        .swap_assignments(input.assignment_id_1, input.assignment_id_2)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(vec![first, second])))
}
