use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use crate::auth::Claims;
use crate::database::filters::EmployeeFilter;
use crate::database::models::{AdminFlagInput, EmployeeInfo, UpdateEmployeeInput};
use crate::database::repositories::EmployeeRepository;
use crate::error::AppError;
use crate::handlers::{require_admin, shared::ApiResponse};

pub async fn get_employees(
    repo: web::Data<EmployeeRepository>,
    query: web::Query<HashMap<String, String>>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let filter = EmployeeFilter::from_params(&query)?;
    let employees = repo.find_by_filter(filter).await?;
    let infos: Vec<EmployeeInfo> = employees.into_iter().map(EmployeeInfo::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(infos)))
}

pub async fn get_employee(
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !claims.is_admin() && claims.employee_id().map_err(AppError::from)? != id {
        return Err(AppError::Forbidden(
            "Cannot view another employee's record".to_string(),
        ));
    }

    let employee = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(EmployeeInfo::from(employee))))
}

pub async fn update_employee(
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
    input: web::Json<UpdateEmployeeInput>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !claims.is_admin() && claims.employee_id().map_err(AppError::from)? != id {
        return Err(AppError::Forbidden(
            "Cannot update another employee's record".to_string(),
        ));
    }

    let employee = repo
        .update_employee(id, input.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(EmployeeInfo::from(employee))))
}

pub async fn set_admin_flag(
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
    input: web::Json<AdminFlagInput>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let id = path.into_inner();
    let employee = repo
        .set_admin(id, input.admin)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(EmployeeInfo::from(employee))))
}

pub async fn delete_employee(
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let id = path.into_inner();
    if !repo.delete_employee(id).await? {
        return Err(AppError::NotFound(format!("Employee {} not found", id)));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Employee deleted",
    )))
}
