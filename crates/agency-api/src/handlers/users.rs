//! 用户管理 API 处理器
//!
//! 管理员账号由管理员创建；客户与达人账号允许自助注册

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use tracing::info;
use validator::Validate;

use crate::auth::{AuthUser, Role, hash_password};
use crate::dto::{
    AdminUpdateUserRequest, ApiResponse, CreateUserRequest, DeletedResponse, UpdateUserRequest,
    UserDto,
};
use crate::error::{AgencyError, Result};
use crate::models::{NewUser, UserChanges};
use crate::state::AppState;

/// 用户列表
///
/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<UserDto>>>> {
    let users = state.users.list().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserDto>>> {
    let user = state
        .users
        .get(id)
        .await?
        .ok_or_else(|| AgencyError::not_found("user", id))?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// POST /api/v1/users/admin
pub async fn create_admin_user(
    state: State<AppState>,
    req: Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>> {
    create_user(state, req, Role::Admin).await
}

/// POST /api/v1/users/client
pub async fn register_client(
    state: State<AppState>,
    req: Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>> {
    create_user(state, req, Role::Client).await
}

/// POST /api/v1/users/influencer
pub async fn register_influencer(
    state: State<AppState>,
    req: Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>> {
    create_user(state, req, Role::Influencer).await
}

async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
    role: Role,
) -> Result<Json<ApiResponse<UserDto>>> {
    req.validate()?;

    let new_user = NewUser {
        full_name: req.full_name,
        preferred_name: req.preferred_name,
        contact_number: req.contact_number,
        email_address: req.email_address,
        username: req.username,
        password_hash: hash_password(&req.password)?,
        role,
    };

    let user = state.users.create(&new_user).await?;

    info!(user_id = user.user_id, username = %user.username, role = %role, "User created");

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// 更新用户资料
///
/// 非管理员只能修改自己的资料
///
/// PATCH /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>> {
    if caller.role != Role::Admin && caller.user_id != id {
        return Err(AgencyError::Forbidden);
    }
    req.validate()?;

    let changes = profile_changes(req)?;
    let user = state
        .users
        .update(id, &changes)
        .await?
        .ok_or_else(|| AgencyError::not_found("user", id))?;

    info!(user_id = id, updated_by = caller.user_id, "User updated");

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// 管理员更新用户，可修改角色
///
/// PATCH /api/v1/users/{id}/role
pub async fn admin_update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<AdminUpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>> {
    req.validate()?;

    let changes = UserChanges {
        role: req.role,
        ..profile_changes(req.profile)?
    };
    let user = state
        .users
        .update(id, &changes)
        .await?
        .ok_or_else(|| AgencyError::not_found("user", id))?;

    info!(user_id = id, role = %user.role, updated_by = caller.user_id, "User updated by admin");

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeletedResponse>>> {
    if !state.users.delete(id).await? {
        return Err(AgencyError::not_found("user", id));
    }

    info!(user_id = id, "User deleted");

    Ok(Json(ApiResponse::success(DeletedResponse::success())))
}

/// 资料更新转换为存储层变更，新密码在此哈希
fn profile_changes(req: UpdateUserRequest) -> Result<UserChanges> {
    let password_hash = req.password.as_deref().map(hash_password).transpose()?;

    Ok(UserChanges {
        full_name: req.full_name,
        preferred_name: req.preferred_name,
        contact_number: req.contact_number,
        email_address: req.email_address,
        password_hash,
        role: None,
    })
}
