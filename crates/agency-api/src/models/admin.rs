//! 管理员档案

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub admin_id: i64,
    pub full_name: String,
    pub preferred_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAdmin {
    #[validate(length(min = 1, max = 200, message = "姓名长度必须在 1-200 个字符之间"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 200, message = "昵称长度必须在 1-200 个字符之间"))]
    pub preferred_name: String,
    #[validate(length(min = 1, max = 50, message = "联系电话长度必须在 1-50 个字符之间"))]
    pub contact_number: String,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email_address: String,
}

/// 部分更新，未提供的字段保持不变
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminChanges {
    #[validate(length(min = 1, max = 200, message = "姓名长度必须在 1-200 个字符之间"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "昵称长度必须在 1-200 个字符之间"))]
    pub preferred_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "联系电话长度必须在 1-50 个字符之间"))]
    pub contact_number: Option<String>,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email_address: Option<String>,
}
