//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::Role;
use crate::models::User;

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }
}

/// 用户信息，不包含密码哈希
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: i64,
    pub full_name: String,
    pub preferred_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            full_name: user.full_name,
            preferred_name: user.preferred_name,
            contact_number: user.contact_number,
            email_address: user.email_address,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// 登录响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
    pub user: UserDto,
}

/// Token 刷新响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: String,
    pub expires_at: i64,
}

/// 删除成功响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub deleted: bool,
}

impl DeletedResponse {
    pub fn success() -> Self {
        Self { deleted: true }
    }
}

/// 受保护的健康检查结果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: &'static str,
    pub database: &'static str,
    pub uptime_seconds: u64,
}
