//! 认证相关的 HTTP 处理器
//!
//! 提供登录、获取当前用户和刷新 Token 的 API

use axum::{Extension, Json, extract::State};
use tracing::{info, warn};
use validator::Validate;

use crate::auth::{AuthUser, verify_password};
use crate::dto::{ApiResponse, LoginRequest, LoginResponse, RefreshResponse, UserDto};
use crate::error::{AgencyError, Result};
use crate::state::AppState;

/// 用户登录
///
/// 用户不存在、角色不匹配、密码错误统一返回 INVALID_CREDENTIALS
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    req.validate()?;

    let Some(user) = state.users.find_by_username(&req.username).await? else {
        warn!(username = %req.username, "Login failed: unknown user");
        return Err(AgencyError::InvalidCredentials);
    };

    if user.role != req.role {
        warn!(user_id = user.user_id, requested_role = %req.role, "Login failed: role mismatch");
        return Err(AgencyError::InvalidCredentials);
    }

    if !verify_password(&req.password, &user.password_hash)? {
        warn!(user_id = user.user_id, "Login failed: wrong password");
        return Err(AgencyError::InvalidCredentials);
    }

    let (token, expires_at) = state
        .jwt_manager
        .generate_token(user.user_id, &user.username, user.role)?;

    info!(user_id = user.user_id, role = %user.role, "User logged in");

    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        expires_at,
        user: UserDto::from(user),
    })))
}

/// 获取当前用户信息
///
/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<ApiResponse<UserDto>>> {
    let user = state
        .users
        .get(caller.user_id)
        .await?
        .ok_or_else(|| AgencyError::not_found("user", caller.user_id))?;

    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

/// 刷新 Token
///
/// POST /api/v1/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<ApiResponse<RefreshResponse>>> {
    let (token, expires_at) =
        state
            .jwt_manager
            .refresh_token(caller.user_id, &caller.username, caller.role)?;

    info!(user_id = caller.user_id, "Token refreshed");

    Ok(Json(ApiResponse::success(RefreshResponse { token, expires_at })))
}
