//! 表格列映射配置
//!
//! 列标题到实体字段的映射是显式的配置值，由调用方传入导入流程，
//! 可以通过配置文件的 `[import]` 段覆盖。

use serde::Deserialize;

/// 导入配置
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub client: ClientColumns,
    pub influencer: InfluencerColumns,
}

/// 客户表格的列标题
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientColumns {
    pub sheet_name: String,
    pub company_name: String,
    pub pic_name: String,
    pub company_email: String,
    pub pic_email: String,
    pub contact_number: String,
    pub additional_contact_number: String,
    pub industry: String,
    pub category: String,
    pub package: String,
    pub is_halal: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
}

impl Default for ClientColumns {
    fn default() -> Self {
        Self {
            sheet_name: "Client Data".to_string(),
            company_name: "Company Name".to_string(),
            pic_name: "PIC Name".to_string(),
            company_email: "Company Email".to_string(),
            pic_email: "PIC Email".to_string(),
            contact_number: "Contact Number".to_string(),
            additional_contact_number: "Additional Contact Number".to_string(),
            industry: "Industry".to_string(),
            category: "Category".to_string(),
            package: "Package".to_string(),
            is_halal: "Is Halal".to_string(),
            address: "Address".to_string(),
            city: "City".to_string(),
            state: "State".to_string(),
            postcode: "Postcode".to_string(),
            country: "Country".to_string(),
        }
    }
}

/// 单个社交平台的列组
///
/// 只有 url 列有值时才会创建账号。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlatformColumns {
    /// platforms 表中的平台名称
    pub platform: String,
    pub url: String,
    pub account_type: String,
    pub followers: String,
}

impl PlatformColumns {
    /// 按 "<平台> URL"、"<平台> Account Type"、"<平台> Followers" 的约定生成列标题
    pub fn for_platform(platform: &str) -> Self {
        Self {
            platform: platform.to_string(),
            url: format!("{platform} URL"),
            account_type: format!("{platform} Account Type"),
            followers: format!("{platform} Followers"),
        }
    }
}

/// 达人表格的列标题
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InfluencerColumns {
    pub sheet_name: String,
    pub full_name: String,
    pub preferred_name: String,
    pub contact_number: String,
    pub additional_contact_number: String,
    pub email_address: String,
    pub country: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub multiple_countries: String,
    pub additional_country: String,
    pub industry: String,
    pub consent_whatsapp_group: String,
    pub whatsapp_invited: String,
    pub community: String,
    pub invite_count: String,
    pub platforms: Vec<PlatformColumns>,
}

impl Default for InfluencerColumns {
    fn default() -> Self {
        Self {
            sheet_name: "Influencer Data".to_string(),
            full_name: "Full Name".to_string(),
            preferred_name: "Preferred Name".to_string(),
            contact_number: "Contact Number".to_string(),
            additional_contact_number: "Additional Contact Number".to_string(),
            email_address: "Email Address".to_string(),
            country: "Country".to_string(),
            city: "City".to_string(),
            state: "State".to_string(),
            postcode: "Postcode".to_string(),
            multiple_countries: "Multiple Countries".to_string(),
            additional_country: "Additional Country".to_string(),
            industry: "Industry".to_string(),
            consent_whatsapp_group: "Consent WhatsApp Group".to_string(),
            whatsapp_invited: "WhatsApp Invited".to_string(),
            community: "Community".to_string(),
            invite_count: "Invite Count".to_string(),
            platforms: ["Instagram", "TikTok", "RedBook"]
                .into_iter()
                .map(PlatformColumns::for_platform)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_platform_groups() {
        let columns = InfluencerColumns::default();
        let names: Vec<&str> = columns.platforms.iter().map(|p| p.platform.as_str()).collect();
        assert_eq!(names, ["Instagram", "TikTok", "RedBook"]);
        assert_eq!(columns.platforms[1].followers, "TikTok Followers");
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config: ImportConfig = serde_json::from_value(serde_json::json!({
            "client": { "sheet_name": "Clients", "company_name": "Company" }
        }))
        .unwrap();

        assert_eq!(config.client.sheet_name, "Clients");
        assert_eq!(config.client.company_name, "Company");
        assert_eq!(config.client.pic_name, "PIC Name");
        assert_eq!(config.influencer, InfluencerColumns::default());
    }
}
