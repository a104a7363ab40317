//! 登录身份

use chrono::{DateTime, Utc};

use crate::auth::Role;

/// 用户实体，包含密码哈希，不直接序列化给调用方
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: i64,
    pub full_name: String,
    pub preferred_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建用户，密码已完成哈希
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub full_name: String,
    pub preferred_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// 用户部分更新，密码已完成哈希
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub full_name: Option<String>,
    pub preferred_name: Option<String>,
    pub contact_number: Option<String>,
    pub email_address: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}
