//! 客户公司及其门店地址

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{email_or_placeholder, placeholder};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub client_id: i64,
    pub company_name: String,
    pub person_in_charge_name: String,
    pub company_email: String,
    pub pic_email: String,
    pub contact_number: String,
    pub additional_contact_number: String,
    pub industry: String,
    pub category: String,
    pub package: String,
    pub is_halal: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClientLocation {
    pub client_location_id: i64,
    pub client_id: i64,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientWithLocations {
    #[serde(flatten)]
    pub client: Client,
    pub locations: Vec<ClientLocation>,
}

/// 新建客户，可选文本字段缺省为 "-"
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    #[validate(length(min = 1, max = 200, message = "公司名称长度必须在 1-200 个字符之间"))]
    pub company_name: String,
    #[validate(length(min = 1, max = 200, message = "负责人姓名长度必须在 1-200 个字符之间"))]
    pub person_in_charge_name: String,
    #[serde(default = "placeholder")]
    #[validate(custom(function = "email_or_placeholder"))]
    pub company_email: String,
    #[serde(default = "placeholder")]
    #[validate(custom(function = "email_or_placeholder"))]
    pub pic_email: String,
    #[validate(length(min = 1, max = 50, message = "联系电话长度必须在 1-50 个字符之间"))]
    pub contact_number: String,
    #[serde(default = "placeholder")]
    pub additional_contact_number: String,
    #[serde(default = "placeholder")]
    pub industry: String,
    #[serde(default = "placeholder")]
    pub category: String,
    #[serde(default = "placeholder")]
    pub package: String,
    #[serde(default)]
    pub is_halal: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    #[serde(default = "placeholder")]
    #[validate(length(min = 1, max = 500, message = "地址长度必须在 1-500 个字符之间"))]
    pub address: String,
    #[serde(default = "placeholder")]
    pub city: String,
    #[serde(default = "placeholder")]
    pub state: String,
    #[serde(default = "placeholder")]
    pub postcode: String,
    #[serde(default = "placeholder")]
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientChanges {
    #[validate(length(min = 1, max = 200, message = "公司名称长度必须在 1-200 个字符之间"))]
    pub company_name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "负责人姓名长度必须在 1-200 个字符之间"))]
    pub person_in_charge_name: Option<String>,
    #[validate(custom(function = "email_or_placeholder"))]
    pub company_email: Option<String>,
    #[validate(custom(function = "email_or_placeholder"))]
    pub pic_email: Option<String>,
    #[validate(length(min = 1, max = 50, message = "联系电话长度必须在 1-50 个字符之间"))]
    pub contact_number: Option<String>,
    pub additional_contact_number: Option<String>,
    pub industry: Option<String>,
    pub category: Option<String>,
    pub package: Option<String>,
    pub is_halal: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LocationChanges {
    #[validate(length(min = 1, max = 500, message = "地址长度必须在 1-500 个字符之间"))]
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_client_defaults_optional_fields() {
        let client: NewClient = serde_json::from_value(json!({
            "companyName": "Nasi Lemak House",
            "personInChargeName": "Aida",
            "contactNumber": "0123456789"
        }))
        .unwrap();

        assert_eq!(client.company_email, "-");
        assert_eq!(client.industry, "-");
        assert!(!client.is_halal);
        assert!(client.validate().is_ok());
    }

    #[test]
    fn test_new_client_rejects_bad_email() {
        let client: NewClient = serde_json::from_value(json!({
            "companyName": "Nasi Lemak House",
            "personInChargeName": "Aida",
            "contactNumber": "0123456789",
            "companyEmail": "nope"
        }))
        .unwrap();

        let errors = client.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("company_email"));
    }

    #[test]
    fn test_client_with_locations_serializes_flat() {
        let now = Utc::now();
        let view = ClientWithLocations {
            client: Client {
                client_id: 1,
                company_name: "Kopi Co".into(),
                person_in_charge_name: "Ben".into(),
                company_email: "-".into(),
                pic_email: "-".into(),
                contact_number: "1".into(),
                additional_contact_number: "-".into(),
                industry: "-".into(),
                category: "-".into(),
                package: "-".into(),
                is_halal: true,
                created_at: now,
                updated_at: now,
            },
            locations: vec![],
        };

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["clientId"], 1);
        assert_eq!(value["isHalal"], true);
        assert!(value["locations"].as_array().unwrap().is_empty());
    }
}
