//! 实体模型模块
//!
//! 数据库实体（FromRow）以及写入时使用的输入结构

pub mod admin;
pub mod campaign;
pub mod client;
pub mod influencer;
pub mod user;

pub use admin::{Admin, AdminChanges, NewAdmin};
pub use campaign::{
    Booking, BookingChanges, Campaign, CampaignChanges, CampaignWithClient, NewBooking,
    NewCampaign,
};
pub use client::{
    Client, ClientChanges, ClientLocation, ClientWithLocations, LocationChanges, NewClient,
    NewLocation,
};
pub use influencer::{
    Account, AccountChanges, Influencer, InfluencerChanges, InfluencerWithAccounts, NewAccount,
    NewInfluencer, Platform,
};
pub use user::{NewUser, User, UserChanges};

/// 可选文本字段未填写时使用的占位值
pub const PLACEHOLDER: &str = "-";

pub(crate) fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

/// 邮箱字段校验：允许占位值，否则必须是合法邮箱
pub(crate) fn email_or_placeholder(value: &str) -> Result<(), validator::ValidationError> {
    use validator::ValidateEmail;

    if value == PLACEHOLDER || value.validate_email() {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("email");
        err.message = Some("邮箱格式不正确".into());
        Err(err)
    }
}
