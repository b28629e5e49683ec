use std::collections::HashMap;

use actix_web::{web, HttpResponse};

use crate::auth::Claims;
use crate::database::filters::SlotFilter;
use crate::database::models::{ShiftSlotInput, UpdateShiftSlotInput};
use crate::database::repositories::ShiftSlotRepository;
use crate::error::AppError;
use crate::handlers::{require_admin, shared::ApiResponse};

pub async fn create_slot(
    repo: web::Data<ShiftSlotRepository>,
    input: web::Json<ShiftSlotInput>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let slot = repo.create_slot(input.into_inner()).await?;
    log::info!("Created shift slot {}", slot.id);

    Ok(HttpResponse::Created().json(ApiResponse::success(slot)))
}

pub async fn get_slots(
    repo: web::Data<ShiftSlotRepository>,
    query: web::Query<HashMap<String, String>>,
    _claims: Claims,
) -> Result<HttpResponse, AppError> {
    let filter = SlotFilter::from_params(&query)?;
    let slots = repo.find_by_filter(filter).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(slots)))
}

pub async fn get_slot(
    repo: web::Data<ShiftSlotRepository>,
    path: web::Path<i64>,
    _claims: Claims,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let slot = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shift slot {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(slot)))
}

pub async fn update_slot(
    repo: web::Data<ShiftSlotRepository>,
    path: web::Path<i64>,
    input: web::Json<UpdateShiftSlotInput>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let id = path.into_inner();
    let slot = repo
        .update_slot(id, input.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shift slot {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(slot)))
}

pub async fn delete_slot(
    repo: web::Data<ShiftSlotRepository>,
    path: web::Path<i64>,
    claims: Claims,
) -> Result<HttpResponse, AppError> {
    require_admin(&claims)?;

    let id = path.into_inner();
    if !repo.delete_slot(id).await? {
        return Err(AppError::NotFound(format!("Shift slot {} not found", id)));
    }
    log::info!("Deleted shift slot {}", id);

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Shift slot deleted",
    )))
}
