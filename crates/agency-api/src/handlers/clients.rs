//! 客户管理 API 处理器
//!
//! 客户及其门店地址的 CRUD

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::info;
use validator::Validate;

use crate::dto::{ApiResponse, CreateClientRequest, DeletedResponse};
use crate::error::{AgencyError, Result};
use crate::models::{
    Client, ClientChanges, ClientLocation, ClientWithLocations, LocationChanges, NewLocation,
};
use crate::state::AppState;

/// 客户列表
///
/// GET /api/v1/clients
pub async fn list_clients(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Client>>>> {
    Ok(Json(ApiResponse::success(state.clients.list_clients().await?)))
}

/// 客户详情，包含全部门店地址
///
/// GET /api/v1/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ClientWithLocations>>> {
    let client = state
        .clients
        .get_client_with_locations(id)
        .await?
        .ok_or_else(|| AgencyError::not_found("client", id))?;

    Ok(Json(ApiResponse::success(client)))
}

/// 创建客户及门店地址
///
/// POST /api/v1/clients
pub async fn create_client(
    State(state): State<AppState>,
    Json(req): Json<CreateClientRequest>,
) -> Result<Json<ApiResponse<ClientWithLocations>>> {
    req.validate()?;

    let created = state
        .clients
        .create_client_with_locations(&req.client, &req.locations)
        .await?;

    info!(
        client_id = created.client.client_id,
        locations = created.locations.len(),
        "Client created"
    );

    Ok(Json(ApiResponse::success(created)))
}

/// PATCH /api/v1/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ClientChanges>,
) -> Result<Json<ApiResponse<Client>>> {
    req.validate()?;

    let client = state
        .clients
        .update_client(id, &req)
        .await?
        .ok_or_else(|| AgencyError::not_found("client", id))?;
    info!(client_id = id, "Client updated");

    Ok(Json(ApiResponse::success(client)))
}

/// DELETE /api/v1/clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>> {
    if !state.clients.delete_client(id).await? {
        return Err(AgencyError::not_found("client", id));
    }
    info!(client_id = id, "Client deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success())))
}

/// 为客户新增门店地址
///
/// POST /api/v1/clients/{id}/locations
pub async fn add_location(
    State(state): State<AppState>,
    Path(client_id): Path<i64>,
    Json(req): Json<NewLocation>,
) -> Result<Json<ApiResponse<ClientLocation>>> {
    req.validate()?;

    if state.clients.get_client(client_id).await?.is_none() {
        return Err(AgencyError::not_found("client", client_id));
    }

    let location = state.clients.create_location(client_id, &req).await?;
    info!(
        client_id,
        client_location_id = location.client_location_id,
        "Client location created"
    );

    Ok(Json(ApiResponse::success(location)))
}

/// PATCH /api/v1/clients/locations/{id}
pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<LocationChanges>,
) -> Result<Json<ApiResponse<ClientLocation>>> {
    req.validate()?;

    let location = state
        .clients
        .update_location(id, &req)
        .await?
        .ok_or_else(|| AgencyError::not_found("location", id))?;
    info!(client_location_id = id, "Client location updated");

    Ok(Json(ApiResponse::success(location)))
}

/// DELETE /api/v1/clients/locations/{id}
pub async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>> {
    if !state.clients.delete_location(id).await? {
        return Err(AgencyError::not_found("location", id));
    }
    info!(client_location_id = id, "Client location deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success())))
}
