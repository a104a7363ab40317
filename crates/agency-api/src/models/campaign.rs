//! 营销活动与达人预约

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::Client;
use super::placeholder;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub campaign_id: i64,
    pub client_id: i64,
    pub campaign_name: String,
    pub food_offering: String,
    pub campaign_address: String,
    pub package: String,
    pub feedback: String,
    pub max_pax: i32,
    pub booking_availability: String,
    pub availability_public_holiday: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_halal: bool,
    pub slots: i32,
    pub slot_status: String,
    pub is_result: bool,
    pub campaign_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignWithClient {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub client: Client,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_date_range"))]
pub struct NewCampaign {
    #[validate(range(min = 1, message = "客户 ID 无效"))]
    pub client_id: i64,
    #[validate(length(min = 1, max = 200, message = "活动名称长度必须在 1-200 个字符之间"))]
    pub campaign_name: String,
    #[serde(default = "placeholder")]
    pub food_offering: String,
    #[serde(default = "placeholder")]
    pub campaign_address: String,
    #[serde(default = "placeholder")]
    pub package: String,
    #[serde(default = "placeholder")]
    pub feedback: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "人数上限不能为负数"))]
    pub max_pax: i32,
    #[serde(default = "placeholder")]
    pub booking_availability: String,
    #[serde(default = "placeholder")]
    pub availability_public_holiday: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub is_halal: bool,
    #[serde(default)]
    #[validate(range(min = 0, message = "名额不能为负数"))]
    pub slots: i32,
    #[serde(default = "placeholder")]
    pub slot_status: String,
    #[serde(default)]
    pub is_result: bool,
    #[serde(default = "placeholder")]
    pub campaign_status: String,
}

fn validate_date_range(campaign: &NewCampaign) -> Result<(), ValidationError> {
    check_date_range(campaign.start_date, campaign.end_date)
}

fn check_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), ValidationError> {
    if start <= end {
        Ok(())
    } else {
        let mut err = ValidationError::new("date_range");
        err.message = Some("开始日期不能晚于结束日期".into());
        Err(err)
    }
}

/// 部分更新
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_changed_date_range"))]
pub struct CampaignChanges {
    #[validate(length(min = 1, max = 200, message = "活动名称长度必须在 1-200 个字符之间"))]
    pub campaign_name: Option<String>,
    pub food_offering: Option<String>,
    pub campaign_address: Option<String>,
    pub package: Option<String>,
    pub feedback: Option<String>,
    #[validate(range(min = 0, message = "人数上限不能为负数"))]
    pub max_pax: Option<i32>,
    pub booking_availability: Option<String>,
    pub availability_public_holiday: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub is_halal: Option<bool>,
    #[validate(range(min = 0, message = "名额不能为负数"))]
    pub slots: Option<i32>,
    pub slot_status: Option<String>,
    pub is_result: Option<bool>,
    pub campaign_status: Option<String>,
}

impl CampaignChanges {
    /// 只修改一端日期时，与已保存的另一端组成区间再校验
    pub fn validate_against(&self, current: &Campaign) -> Result<(), ValidationError> {
        check_date_range(
            self.start_date.unwrap_or(current.start_date),
            self.end_date.unwrap_or(current.end_date),
        )
    }

    /// 是否只提供了开始或结束日期中的一个
    pub fn changes_one_date(&self) -> bool {
        self.start_date.is_some() != self.end_date.is_some()
    }
}

fn validate_changed_date_range(changes: &CampaignChanges) -> Result<(), ValidationError> {
    match (changes.start_date, changes.end_date) {
        (Some(start), Some(end)) => check_date_range(start, end),
        _ => Ok(()),
    }
}

/// 活动与达人之间的预约
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: i64,
    pub campaign_id: i64,
    pub influencer_id: i64,
    pub campaign_name: String,
    pub full_name: String,
    pub booking_datetime: DateTime<Utc>,
    pub pax_no: i32,
    pub booking_type: String,
    pub social_media_handler: String,
    pub is_due: bool,
    pub social_media_post: String,
    pub review_posted: bool,
    pub is_completed: bool,
    pub influencer_response_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 新建预约，活动名称与达人姓名由仓储从关联记录中带出
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[validate(range(min = 1, message = "活动 ID 无效"))]
    pub campaign_id: i64,
    #[validate(range(min = 1, message = "达人 ID 无效"))]
    pub influencer_id: i64,
    pub booking_datetime: DateTime<Utc>,
    #[serde(default = "default_pax")]
    #[validate(range(min = 1, message = "到店人数至少为 1"))]
    pub pax_no: i32,
    #[serde(default = "placeholder")]
    pub booking_type: String,
    #[serde(default = "placeholder")]
    pub social_media_handler: String,
    #[serde(default)]
    pub is_due: bool,
    #[serde(default = "placeholder")]
    pub social_media_post: String,
    #[serde(default)]
    pub review_posted: bool,
    #[serde(default)]
    pub is_completed: bool,
    pub influencer_response_date: Option<DateTime<Utc>>,
}

fn default_pax() -> i32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingChanges {
    pub booking_datetime: Option<DateTime<Utc>>,
    #[validate(range(min = 1, message = "到店人数至少为 1"))]
    pub pax_no: Option<i32>,
    pub booking_type: Option<String>,
    pub social_media_handler: Option<String>,
    pub is_due: Option<bool>,
    pub social_media_post: Option<String>,
    pub review_posted: Option<bool>,
    pub is_completed: Option<bool>,
    pub influencer_response_date: Option<DateTime<Utc>>,
}
