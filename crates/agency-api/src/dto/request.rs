//! 请求 DTO 定义
//!
//! 实体写入结构（`New*` / `*Changes`）直接作为请求体使用，这里只定义组合请求和账号相关请求

use serde::Deserialize;
use validator::Validate;

use crate::auth::{Role, validate_password_strength};
use crate::models::{NewAccount, NewClient, NewInfluencer, NewLocation};

/// 登录请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "用户名长度必须在 1-50 之间"))]
    pub username: String,
    #[validate(length(min = 1, max = 100, message = "密码长度必须在 1-100 之间"))]
    pub password: String,
    pub role: Role,
}

/// 创建账号请求，角色由路由决定
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 200, message = "姓名长度必须在 1-200 个字符之间"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 200, message = "昵称长度必须在 1-200 个字符之间"))]
    pub preferred_name: String,
    #[validate(length(min = 1, max = 50, message = "联系电话长度必须在 1-50 个字符之间"))]
    pub contact_number: String,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email_address: String,
    #[validate(length(min = 3, max = 50, message = "用户名长度必须在 3-50 之间"))]
    pub username: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

/// 更新本人资料
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 200, message = "姓名长度必须在 1-200 个字符之间"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "昵称长度必须在 1-200 个字符之间"))]
    pub preferred_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "联系电话长度必须在 1-50 个字符之间"))]
    pub contact_number: Option<String>,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email_address: Option<String>,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: Option<String>,
}

/// 管理员更新用户，可修改角色
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateUserRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: UpdateUserRequest,
    pub role: Option<Role>,
}

/// 创建客户及其门店地址
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub client: NewClient,
    #[serde(default)]
    #[validate(nested)]
    pub locations: Vec<NewLocation>,
}

/// 创建达人及其社交账号
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInfluencerRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub influencer: NewInfluencer,
    #[serde(default)]
    #[validate(nested)]
    pub accounts: Vec<NewAccount>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_requires_known_role() {
        let ok: LoginRequest = serde_json::from_value(json!({
            "username": "aida",
            "password": "Secret#2024",
            "role": "Client"
        }))
        .unwrap();
        assert_eq!(ok.role, Role::Client);

        let bad = serde_json::from_value::<LoginRequest>(json!({
            "username": "aida",
            "password": "Secret#2024",
            "role": "client"
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_create_user_rejects_weak_password() {
        let req: CreateUserRequest = serde_json::from_value(json!({
            "fullName": "Aida Rahman",
            "preferredName": "Aida",
            "contactNumber": "0123456789",
            "emailAddress": "aida@example.com",
            "username": "aida",
            "password": "password"
        }))
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_create_client_request_flattens_client_fields() {
        let req: CreateClientRequest = serde_json::from_value(json!({
            "companyName": "Kopi Co",
            "personInChargeName": "Ben",
            "contactNumber": "0123456789",
            "locations": [{ "address": "1 Jalan Sultan", "city": "Ipoh" }]
        }))
        .unwrap();

        assert_eq!(req.client.company_name, "Kopi Co");
        assert_eq!(req.locations.len(), 1);
        assert_eq!(req.locations[0].postcode, "-");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_influencer_request_validates_accounts() {
        let req: CreateInfluencerRequest = serde_json::from_value(json!({
            "fullName": "Siti Rahman",
            "preferredName": "Siti",
            "contactNumber": "0198765432",
            "accounts": [{ "platformId": 1, "socialMediaUrl": "", "followers": 10 }]
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_admin_update_accepts_role_only() {
        let req: AdminUpdateUserRequest =
            serde_json::from_value(json!({ "role": "Influencer" })).unwrap();
        assert_eq!(req.role, Some(Role::Influencer));
        assert!(req.profile.full_name.is_none());
        assert!(req.validate().is_ok());
    }
}
