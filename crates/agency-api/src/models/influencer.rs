//! 达人、社交平台与社交账号

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{email_or_placeholder, placeholder};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Influencer {
    pub influencer_id: i64,
    pub full_name: String,
    pub preferred_name: String,
    pub contact_number: String,
    pub additional_contact_number: String,
    pub email_address: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub multiple_countries: bool,
    pub additional_country: String,
    pub industry: String,
    pub consent_whatsapp_group: bool,
    pub whatsapp_invited: bool,
    pub community: bool,
    pub invite_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub platform_id: i64,
    pub platform_name: String,
}

/// 社交账号，附带平台名称
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: i64,
    pub influencer_id: i64,
    pub platform_id: i64,
    pub platform_name: String,
    pub account_type: String,
    pub social_media_url: String,
    pub followers: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerWithAccounts {
    #[serde(flatten)]
    pub influencer: Influencer,
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewInfluencer {
    #[validate(length(min = 1, max = 200, message = "姓名长度必须在 1-200 个字符之间"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 200, message = "昵称长度必须在 1-200 个字符之间"))]
    pub preferred_name: String,
    #[validate(length(min = 1, max = 50, message = "联系电话长度必须在 1-50 个字符之间"))]
    pub contact_number: String,
    #[serde(default = "placeholder")]
    pub additional_contact_number: String,
    #[serde(default = "placeholder")]
    #[validate(custom(function = "email_or_placeholder"))]
    pub email_address: String,
    #[serde(default = "placeholder")]
    pub country: String,
    #[serde(default = "placeholder")]
    pub city: String,
    #[serde(default = "placeholder")]
    pub state: String,
    #[serde(default = "placeholder")]
    pub postcode: String,
    #[serde(default)]
    pub multiple_countries: bool,
    #[serde(default = "placeholder")]
    pub additional_country: String,
    #[serde(default = "placeholder")]
    pub industry: String,
    #[serde(default)]
    pub consent_whatsapp_group: bool,
    #[serde(default)]
    pub whatsapp_invited: bool,
    #[serde(default)]
    pub community: bool,
    #[serde(default)]
    #[validate(range(min = 0, message = "邀请次数不能为负数"))]
    pub invite_count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    #[validate(range(min = 1, message = "平台 ID 无效"))]
    pub platform_id: i64,
    #[serde(default = "placeholder")]
    pub account_type: String,
    #[validate(length(min = 1, max = 500, message = "主页链接长度必须在 1-500 个字符之间"))]
    pub social_media_url: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "粉丝数不能为负数"))]
    pub followers: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerChanges {
    #[validate(length(min = 1, max = 200, message = "姓名长度必须在 1-200 个字符之间"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "昵称长度必须在 1-200 个字符之间"))]
    pub preferred_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "联系电话长度必须在 1-50 个字符之间"))]
    pub contact_number: Option<String>,
    pub additional_contact_number: Option<String>,
    #[validate(custom(function = "email_or_placeholder"))]
    pub email_address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub multiple_countries: Option<bool>,
    pub additional_country: Option<String>,
    pub industry: Option<String>,
    pub consent_whatsapp_group: Option<bool>,
    pub whatsapp_invited: Option<bool>,
    pub community: Option<bool>,
    #[validate(range(min = 0, message = "邀请次数不能为负数"))]
    pub invite_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountChanges {
    #[validate(range(min = 1, message = "平台 ID 无效"))]
    pub platform_id: Option<i64>,
    pub account_type: Option<String>,
    #[validate(length(min = 1, max = 500, message = "主页链接长度必须在 1-500 个字符之间"))]
    pub social_media_url: Option<String>,
    #[validate(range(min = 0, message = "粉丝数不能为负数"))]
    pub followers: Option<i64>,
}
