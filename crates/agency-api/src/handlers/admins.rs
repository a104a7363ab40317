//! 管理员档案 API 处理器

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;
use validator::Validate;

use crate::dto::{ApiResponse, DeletedResponse};
use crate::error::{AgencyError, Result};
use crate::models::{Admin, AdminChanges, NewAdmin};
use crate::state::AppState;

/// GET /api/v1/admins
pub async fn list_admins(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Admin>>>> {
    Ok(Json(ApiResponse::success(state.admins.list().await?)))
}

/// GET /api/v1/admins/{id}
pub async fn get_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Admin>>> {
    let admin = state
        .admins
        .get(id)
        .await?
        .ok_or_else(|| AgencyError::not_found("admin", id))?;

    Ok(Json(ApiResponse::success(admin)))
}

/// POST /api/v1/admins
pub async fn create_admin(
    State(state): State<AppState>,
    Json(req): Json<NewAdmin>,
) -> Result<Json<ApiResponse<Admin>>> {
    req.validate()?;

    let admin = state.admins.create(&req).await?;
    info!(admin_id = admin.admin_id, "Admin created");

    Ok(Json(ApiResponse::success(admin)))
}

/// PATCH /api/v1/admins/{id}
pub async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<AdminChanges>,
) -> Result<Json<ApiResponse<Admin>>> {
    req.validate()?;

    let admin = state
        .admins
        .update(id, &req)
        .await?
        .ok_or_else(|| AgencyError::not_found("admin", id))?;
    info!(admin_id = id, "Admin updated");

    Ok(Json(ApiResponse::success(admin)))
}

/// DELETE /api/v1/admins/{id}
pub async fn delete_admin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>> {
    if !state.admins.delete(id).await? {
        return Err(AgencyError::not_found("admin", id));
    }
    info!(admin_id = id, "Admin deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success())))
}
