//! 批量导入对账
//!
//! 每一行先写入父记录（客户 / 达人），拿到生成的 ID 后再写入子记录（门店地址 / 社交账号）。
//! 行与行之间相互独立：失败的行被记录下来，之前已写入的行不会回滚。
//! 父记录写入成功而子记录写入失败时，父记录会保留下来，该行仍被记为失败。

use std::collections::HashMap;
use std::time::Instant;

use agency_shared::observability::metrics::record_import;
use serde::Serialize;
use serde::ser::SerializeStruct;
use tracing::{info, warn};
use validator::Validate;

use super::cells::ImportRow;
use super::columns::{ClientColumns, InfluencerColumns};
use super::workbook::read_sheet;
use crate::error::{AgencyError, Result};
use crate::models::{
    ClientWithLocations, InfluencerWithAccounts, NewAccount, NewClient, NewInfluencer,
    NewLocation, Platform,
};
use crate::repository::{ClientStore, InfluencerStore};

/// 导入失败的行
#[derive(Debug)]
pub struct RowFailure {
    pub row_number: usize,
    pub error: AgencyError,
}

impl Serialize for RowFailure {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("RowFailure", 4)?;
        s.serialize_field("rowNumber", &self.row_number)?;
        s.serialize_field("code", self.error.error_code())?;
        s.serialize_field("message", &self.error.public_message())?;
        s.serialize_field("meta", &self.error.meta())?;
        s.end()
    }
}

/// 导入结果：成功写入的记录与失败的行
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport<T> {
    pub imported: Vec<T>,
    pub failures: Vec<RowFailure>,
}

impl<T> Default for ImportReport<T> {
    fn default() -> Self {
        Self {
            imported: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> ImportReport<T> {
    /// 所有行都失败时返回第一行的错误，否则返回报告本身
    pub fn into_result(mut self) -> Result<Self> {
        if self.imported.is_empty() && !self.failures.is_empty() {
            return Err(self.failures.swap_remove(0).error);
        }
        Ok(self)
    }

    fn record(&mut self, entity: &'static str, row_number: usize, outcome: Result<T>) {
        match outcome {
            Ok(item) => self.imported.push(item),
            Err(error) => {
                warn!(
                    entity,
                    row = row_number,
                    code = error.error_code(),
                    error = %error,
                    "Import row failed"
                );
                self.failures.push(RowFailure { row_number, error });
            }
        }
    }

    fn finish(self, entity: &'static str, started: Instant) -> Self {
        let elapsed = started.elapsed();
        record_import(entity, self.imported.len(), self.failures.len(), elapsed.as_secs_f64());
        info!(
            entity,
            imported = self.imported.len(),
            failed = self.failures.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Bulk import finished"
        );
        self
    }
}

/// 从表格导入客户及其门店地址
pub async fn import_clients(
    store: &dyn ClientStore,
    bytes: &[u8],
    columns: &ClientColumns,
) -> Result<ImportReport<ClientWithLocations>> {
    let started = Instant::now();
    let rows = read_sheet(bytes, &columns.sheet_name)?;

    let mut report = ImportReport::default();
    for row in &rows {
        let outcome = import_client_row(store, row, columns).await;
        report.record("client", row.row_number, outcome);
    }

    Ok(report.finish("client", started))
}

/// 构建客户行对应的父记录与地址
pub fn build_client(row: &ImportRow, columns: &ClientColumns) -> Result<(NewClient, NewLocation)> {
    let client = NewClient {
        company_name: row.required_text(&columns.company_name)?,
        person_in_charge_name: row.required_text(&columns.pic_name)?,
        company_email: row.text_or_placeholder(&columns.company_email),
        pic_email: row.text_or_placeholder(&columns.pic_email),
        contact_number: row.required_text(&columns.contact_number)?,
        additional_contact_number: row.text_or_placeholder(&columns.additional_contact_number),
        industry: row.text_or_placeholder(&columns.industry),
        category: row.text_or_placeholder(&columns.category),
        package: row.text_or_placeholder(&columns.package),
        is_halal: row.flag(&columns.is_halal),
    };
    client.validate()?;

    let location = NewLocation {
        address: row.text_or_placeholder(&columns.address),
        city: row.text_or_placeholder(&columns.city),
        state: row.text_or_placeholder(&columns.state),
        postcode: row.text_or_placeholder(&columns.postcode),
        country: row.text_or_placeholder(&columns.country),
    };

    Ok((client, location))
}

async fn import_client_row(
    store: &dyn ClientStore,
    row: &ImportRow,
    columns: &ClientColumns,
) -> Result<ClientWithLocations> {
    let (new_client, new_location) = build_client(row, columns)?;

    let client = store.create_client(&new_client).await?;
    let location = match store.create_location(client.client_id, &new_location).await {
        Ok(location) => location,
        Err(err) => {
            warn!(
                client_id = client.client_id,
                row = row.row_number,
                "Client persisted without location"
            );
            return Err(err);
        }
    };

    Ok(ClientWithLocations {
        client,
        locations: vec![location],
    })
}

/// 从表格导入达人及其社交账号
pub async fn import_influencers(
    store: &dyn InfluencerStore,
    bytes: &[u8],
    columns: &InfluencerColumns,
) -> Result<ImportReport<InfluencerWithAccounts>> {
    let started = Instant::now();
    let rows = read_sheet(bytes, &columns.sheet_name)?;

    // 平台在整个导入过程中只查询一次
    let mut platforms = HashMap::new();
    for group in &columns.platforms {
        let platform = store.find_platform_by_name(&group.platform).await?;
        platforms.insert(group.platform.clone(), platform);
    }

    let mut report = ImportReport::default();
    for row in &rows {
        let outcome = import_influencer_row(store, row, columns, &platforms).await;
        report.record("influencer", row.row_number, outcome);
    }

    Ok(report.finish("influencer", started))
}

/// 构建达人行对应的父记录与各平台账号
///
/// 只有 URL 列有值的平台才会产生账号；平台不存在时整行失败。
pub fn build_influencer(
    row: &ImportRow,
    columns: &InfluencerColumns,
    platforms: &HashMap<String, Option<Platform>>,
) -> Result<(NewInfluencer, Vec<NewAccount>)> {
    let full_name = row.required_text(&columns.full_name)?;
    let contact_number = row.required_text(&columns.contact_number)?;

    let influencer = NewInfluencer {
        preferred_name: row
            .text(&columns.preferred_name)
            .unwrap_or_else(|| full_name.clone()),
        additional_contact_number: row
            .text(&columns.additional_contact_number)
            .unwrap_or_else(|| contact_number.clone()),
        full_name,
        contact_number,
        email_address: row.text_or_placeholder(&columns.email_address),
        country: row.text_or_placeholder(&columns.country),
        city: row.text_or_placeholder(&columns.city),
        state: row.text_or_placeholder(&columns.state),
        postcode: row.text_or_placeholder(&columns.postcode),
        multiple_countries: row.flag(&columns.multiple_countries),
        additional_country: row.text_or_placeholder(&columns.additional_country),
        industry: row.text_or_placeholder(&columns.industry),
        consent_whatsapp_group: row.flag(&columns.consent_whatsapp_group),
        whatsapp_invited: row.flag(&columns.whatsapp_invited),
        community: row.flag(&columns.community),
        invite_count: row.count(&columns.invite_count),
    };
    influencer.validate()?;

    let mut accounts = Vec::new();
    for group in &columns.platforms {
        let Some(url) = row.text(&group.url) else {
            continue;
        };
        let platform = platforms
            .get(&group.platform)
            .and_then(Option::as_ref)
            .ok_or_else(|| {
                AgencyError::Validation(format!(
                    "第 {} 行引用的平台不存在: {}",
                    row.row_number, group.platform
                ))
            })?;
        let account = NewAccount {
            platform_id: platform.platform_id,
            account_type: row.text_or_placeholder(&group.account_type),
            social_media_url: url,
            followers: row.count(&group.followers),
        };
        account.validate()?;
        accounts.push(account);
    }

    Ok((influencer, accounts))
}

async fn import_influencer_row(
    store: &dyn InfluencerStore,
    row: &ImportRow,
    columns: &InfluencerColumns,
    platforms: &HashMap<String, Option<Platform>>,
) -> Result<InfluencerWithAccounts> {
    let (new_influencer, new_accounts) = build_influencer(row, columns, platforms)?;

    let influencer = store.create_influencer(&new_influencer).await?;

    let mut accounts = Vec::with_capacity(new_accounts.len());
    for new_account in &new_accounts {
        match store
            .create_account(influencer.influencer_id, new_account)
            .await
        {
            Ok(account) => accounts.push(account),
            Err(err) => {
                warn!(
                    influencer_id = influencer.influencer_id,
                    row = row.row_number,
                    persisted_accounts = accounts.len(),
                    "Influencer persisted with incomplete accounts"
                );
                return Err(err);
            }
        }
    }

    Ok(InfluencerWithAccounts {
        influencer,
        accounts,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;
    use fake::Fake;
    use fake::faker::company::en::CompanyName;
    use fake::faker::name::en::Name;
    use rust_xlsxwriter::Workbook;
    use sqlx::error::ErrorKind;

    use super::*;
    use crate::error::tests::FakeDbError;
    use crate::models::{Account, Client, ClientLocation, Influencer};
    use crate::repository::{MockClientStore, MockInfluencerStore};

    /// 内存仓储：自增 ID，非占位邮箱唯一
    #[derive(Default)]
    struct MemoryStore {
        clients: Mutex<Vec<Client>>,
        locations: Mutex<Vec<ClientLocation>>,
        influencers: Mutex<Vec<Influencer>>,
        accounts: Mutex<Vec<Account>>,
        platforms: Vec<Platform>,
    }

    impl MemoryStore {
        fn with_platforms(names: &[&str]) -> Self {
            Self {
                platforms: names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| Platform {
                        platform_id: i as i64 + 1,
                        platform_name: name.to_string(),
                    })
                    .collect(),
                ..Default::default()
            }
        }
    }

    fn client_from(client_id: i64, new: &NewClient) -> Client {
        let now = Utc::now();
        Client {
            client_id,
            company_name: new.company_name.clone(),
            person_in_charge_name: new.person_in_charge_name.clone(),
            company_email: new.company_email.clone(),
            pic_email: new.pic_email.clone(),
            contact_number: new.contact_number.clone(),
            additional_contact_number: new.additional_contact_number.clone(),
            industry: new.industry.clone(),
            category: new.category.clone(),
            package: new.package.clone(),
            is_halal: new.is_halal,
            created_at: now,
            updated_at: now,
        }
    }

    fn location_from(client_location_id: i64, client_id: i64, new: &NewLocation) -> ClientLocation {
        let now = Utc::now();
        ClientLocation {
            client_location_id,
            client_id,
            address: new.address.clone(),
            city: new.city.clone(),
            state: new.state.clone(),
            postcode: new.postcode.clone(),
            country: new.country.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn influencer_from(influencer_id: i64, new: &NewInfluencer) -> Influencer {
        let now = Utc::now();
        Influencer {
            influencer_id,
            full_name: new.full_name.clone(),
            preferred_name: new.preferred_name.clone(),
            contact_number: new.contact_number.clone(),
            additional_contact_number: new.additional_contact_number.clone(),
            email_address: new.email_address.clone(),
            country: new.country.clone(),
            city: new.city.clone(),
            state: new.state.clone(),
            postcode: new.postcode.clone(),
            multiple_countries: new.multiple_countries,
            additional_country: new.additional_country.clone(),
            industry: new.industry.clone(),
            consent_whatsapp_group: new.consent_whatsapp_group,
            whatsapp_invited: new.whatsapp_invited,
            community: new.community,
            invite_count: new.invite_count,
            created_at: now,
            updated_at: now,
        }
    }

    #[async_trait::async_trait]
    impl ClientStore for MemoryStore {
        async fn create_client(&self, client: &NewClient) -> Result<Client> {
            let mut clients = self.clients.lock().unwrap();
            if client.company_email != "-"
                && clients.iter().any(|c| c.company_email == client.company_email)
            {
                return Err(FakeDbError::unique("clients_company_email_key", "clients").into());
            }
            let created = client_from(clients.len() as i64 + 1, client);
            clients.push(created.clone());
            Ok(created)
        }

        async fn create_location(
            &self,
            client_id: i64,
            location: &NewLocation,
        ) -> Result<ClientLocation> {
            let mut locations = self.locations.lock().unwrap();
            let created = location_from(locations.len() as i64 + 1, client_id, location);
            locations.push(created.clone());
            Ok(created)
        }
    }

    #[async_trait::async_trait]
    impl InfluencerStore for MemoryStore {
        async fn find_platform_by_name(&self, name: &str) -> Result<Option<Platform>> {
            Ok(self.platforms.iter().find(|p| p.platform_name == name).cloned())
        }

        async fn create_influencer(&self, influencer: &NewInfluencer) -> Result<Influencer> {
            let mut influencers = self.influencers.lock().unwrap();
            if influencer.email_address != "-"
                && influencers
                    .iter()
                    .any(|i| i.email_address == influencer.email_address)
            {
                return Err(
                    FakeDbError::unique("influencers_email_address_key", "influencers").into(),
                );
            }
            let created = influencer_from(influencers.len() as i64 + 1, influencer);
            influencers.push(created.clone());
            Ok(created)
        }

        async fn create_account(&self, influencer_id: i64, account: &NewAccount) -> Result<Account> {
            let platform_name = self
                .platforms
                .iter()
                .find(|p| p.platform_id == account.platform_id)
                .map(|p| p.platform_name.clone())
                .unwrap_or_default();
            let mut accounts = self.accounts.lock().unwrap();
            let now = Utc::now();
            let created = Account {
                account_id: accounts.len() as i64 + 1,
                influencer_id,
                platform_id: account.platform_id,
                platform_name,
                account_type: account.account_type.clone(),
                social_media_url: account.social_media_url.clone(),
                followers: account.followers,
                created_at: now,
                updated_at: now,
            };
            accounts.push(created.clone());
            Ok(created)
        }
    }

    /// 生成单工作表的 xlsx，空字符串表示空白单元格
    fn sheet(name: &str, header: &[&str], rows: &[Vec<String>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name).unwrap();
        for (col, label) in header.iter().enumerate() {
            worksheet.write_string(0, col as u16, *label).unwrap();
        }
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet
                        .write_string(r as u32 + 1, col as u16, value.as_str())
                        .unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    const CLIENT_HEADER: [&str; 9] = [
        "Company Name",
        "PIC Name",
        "Company Email",
        "Contact Number",
        "Is Halal",
        "Address",
        "City",
        "Postcode",
        "Country",
    ];

    fn client_row(company: &str, email: &str, city: &str, postcode: &str) -> Vec<String> {
        [
            company,
            Name().fake::<String>().as_str(),
            email,
            "0123456789",
            "Yes",
            "12 Jalan Ampang",
            city,
            postcode,
            "Malaysia",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[tokio::test]
    async fn test_missing_optional_location_fields_persist_as_placeholder() {
        let store = MemoryStore::default();
        let bytes = sheet(
            "Client Data",
            &CLIENT_HEADER,
            &[
                client_row(&CompanyName().fake::<String>(), "hello@kopi.my", "Kuala Lumpur", "50450"),
                client_row(&CompanyName().fake::<String>(), "", "", ""),
            ],
        );

        let report = import_clients(&store, &bytes, &ClientColumns::default())
            .await
            .unwrap();

        assert_eq!(report.imported.len(), 2);
        assert!(report.failures.is_empty());

        let first = &report.imported[0];
        assert_eq!(first.locations[0].city, "Kuala Lumpur");
        assert_eq!(first.locations[0].postcode, "50450");
        assert!(first.client.is_halal);

        let second = &report.imported[1];
        assert_eq!(second.client.company_email, "-");
        assert_eq!(second.locations[0].city, "-");
        assert_eq!(second.locations[0].postcode, "-");
        assert_eq!(second.locations[0].client_id, second.client.client_id);

        let locations = store.locations.lock().unwrap();
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[1].city, "-");
    }

    #[tokio::test]
    async fn test_reimport_reports_unique_constraint() {
        let store = MemoryStore::default();
        let bytes = sheet(
            "Client Data",
            &CLIENT_HEADER,
            &[client_row("Kopi Co", "hello@kopi.my", "Ipoh", "30000")],
        );

        let first = import_clients(&store, &bytes, &ClientColumns::default())
            .await
            .unwrap();
        assert_eq!(first.imported.len(), 1);

        let second = import_clients(&store, &bytes, &ClientColumns::default())
            .await
            .unwrap();
        assert!(second.imported.is_empty());
        assert_eq!(second.failures.len(), 1);
        assert_eq!(second.failures[0].error.error_code(), "23505");

        match second.into_result() {
            Err(AgencyError::Constraint { code, meta, .. }) => {
                assert_eq!(code, "23505");
                assert_eq!(meta["constraint"], "clients_company_email_key");
            }
            other => panic!("期望约束冲突，实际: {:?}", other),
        }
        assert_eq!(store.clients.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_required_column_fails_only_that_row() {
        let store = MemoryStore::default();
        let mut broken = client_row("Teh Tarik Bar", "", "Penang", "10000");
        broken[1].clear();

        let bytes = sheet(
            "Client Data",
            &CLIENT_HEADER,
            &[
                client_row("Kopi Co", "", "Ipoh", "30000"),
                broken,
                client_row("Roti Canai Hub", "", "Melaka", "75000"),
            ],
        );

        let report = import_clients(&store, &bytes, &ClientColumns::default())
            .await
            .unwrap();

        assert_eq!(report.imported.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].row_number, 3);
        assert!(matches!(
            report.failures[0].error,
            AgencyError::Validation(ref msg) if msg.contains("PIC Name")
        ));

        let value = serde_json::to_value(&report.failures[0]).unwrap();
        assert_eq!(value["rowNumber"], 3);
        assert_eq!(value["code"], "VALIDATION_ERROR");

        let report = report.into_result().unwrap();
        assert_eq!(report.imported.len(), 2);
    }

    #[tokio::test]
    async fn test_child_failure_keeps_parent() {
        let mut store = MockClientStore::new();
        store
            .expect_create_client()
            .times(1)
            .returning(|client| Ok(client_from(41, client)));
        store.expect_create_location().times(1).returning(|_, _| {
            Err(sqlx::Error::Database(Box::new(FakeDbError {
                code: Some("23503"),
                kind: ErrorKind::ForeignKeyViolation,
                constraint: Some("client_locations_client_id_fkey"),
                table: Some("client_locations"),
            })).into())
        });

        let bytes = sheet(
            "Client Data",
            &CLIENT_HEADER,
            &[client_row("Kopi Co", "", "Ipoh", "30000")],
        );

        let report = import_clients(&store, &bytes, &ClientColumns::default())
            .await
            .unwrap();

        assert!(report.imported.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].error.error_code(), "23503");
    }

    #[tokio::test]
    async fn test_invalid_row_never_touches_store() {
        let mut store = MockClientStore::new();
        store.expect_create_client().never();
        store.expect_create_location().never();

        let bytes = sheet(
            "Client Data",
            &CLIENT_HEADER,
            &[client_row("Kopi Co", "not-an-email", "Ipoh", "30000")],
        );

        let result = import_clients(&store, &bytes, &ClientColumns::default())
            .await
            .unwrap()
            .into_result();

        assert!(matches!(result, Err(AgencyError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_sheet_aborts_import() {
        let store = MemoryStore::default();
        let bytes = sheet("Clients", &CLIENT_HEADER, &[]);

        let result = import_clients(&store, &bytes, &ClientColumns::default()).await;
        assert!(matches!(result, Err(AgencyError::FileProcessing(_))));
    }

    const INFLUENCER_HEADER: [&str; 12] = [
        "Full Name",
        "Preferred Name",
        "Contact Number",
        "Email Address",
        "Community",
        "Invite Count",
        "Instagram URL",
        "Instagram Followers",
        "TikTok URL",
        "TikTok Account Type",
        "TikTok Followers",
        "RedBook URL",
    ];

    fn influencer_row(full_name: &str, preferred: &str, email: &str, platforms: [&str; 5]) -> Vec<String> {
        let [ig_url, ig_followers, tt_url, tt_followers, rb_url] = platforms;
        [
            full_name,
            preferred,
            "0198765432",
            email,
            "yes",
            "3",
            ig_url,
            ig_followers,
            tt_url,
            "Creator",
            tt_followers,
            rb_url,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[tokio::test]
    async fn test_influencer_rows_create_zero_to_three_accounts() {
        let store = MemoryStore::with_platforms(&["Instagram", "TikTok", "RedBook"]);
        let name: String = Name().fake();
        let bytes = sheet(
            "Influencer Data",
            &INFLUENCER_HEADER,
            &[
                influencer_row(&name, "", "", ["", "", "", "", ""]),
                influencer_row(
                    "Siti Rahman",
                    "Siti",
                    "siti@example.com",
                    ["https://instagram.com/siti", "16k", "", "", ""],
                ),
                influencer_row(
                    "Wei Ling",
                    "",
                    "",
                    [
                        "https://instagram.com/weiling",
                        "1.5k",
                        "https://tiktok.com/@weiling",
                        "2m",
                        "https://xiaohongshu.com/weiling",
                    ],
                ),
            ],
        );

        let report = import_influencers(&store, &bytes, &InfluencerColumns::default())
            .await
            .unwrap();

        assert!(report.failures.is_empty());
        let counts: Vec<usize> = report.imported.iter().map(|i| i.accounts.len()).collect();
        assert_eq!(counts, [0, 1, 3]);

        let first = &report.imported[0].influencer;
        assert_eq!(first.preferred_name, name);
        assert_eq!(first.additional_contact_number, "0198765432");
        assert!(first.community);
        assert_eq!(first.invite_count, 3);

        let siti = &report.imported[1];
        assert_eq!(siti.influencer.preferred_name, "Siti");
        assert_eq!(siti.accounts[0].followers, 16_000);
        assert_eq!(siti.accounts[0].platform_name, "Instagram");
        assert_eq!(siti.accounts[0].account_type, "-");

        let wei = &report.imported[2];
        let followers: Vec<i64> = wei.accounts.iter().map(|a| a.followers).collect();
        assert_eq!(followers, [1_500, 2_000_000, 0]);
        assert_eq!(wei.accounts[1].account_type, "Creator");
        assert!(
            wei.accounts
                .iter()
                .all(|a| a.influencer_id == wei.influencer.influencer_id)
        );
    }

    #[tokio::test]
    async fn test_unknown_platform_fails_row_before_parent_insert() {
        // 平台表中没有 RedBook
        let store = MemoryStore::with_platforms(&["Instagram", "TikTok"]);
        let bytes = sheet(
            "Influencer Data",
            &INFLUENCER_HEADER,
            &[
                influencer_row("Aina", "", "", ["", "", "", "", "https://xiaohongshu.com/aina"]),
                influencer_row("Ben", "", "", ["https://instagram.com/ben", "900", "", "", ""]),
            ],
        );

        let report = import_influencers(&store, &bytes, &InfluencerColumns::default())
            .await
            .unwrap();

        assert_eq!(report.imported.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].row_number, 2);
        assert_eq!(store.influencers.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_influencer_email_is_constraint() {
        let store = MemoryStore::with_platforms(&["Instagram", "TikTok", "RedBook"]);
        let row = influencer_row("Siti Rahman", "", "siti@example.com", ["", "", "", "", ""]);
        let bytes = sheet("Influencer Data", &INFLUENCER_HEADER, &[row.clone(), row]);

        let report = import_influencers(&store, &bytes, &InfluencerColumns::default())
            .await
            .unwrap();

        assert_eq!(report.imported.len(), 1);
        assert_eq!(report.failures[0].error.error_code(), "23505");
        assert_eq!(report.failures[0].row_number, 3);
    }

    #[tokio::test]
    async fn test_platforms_are_resolved_once_per_import() {
        let mut store = MockInfluencerStore::new();
        store
            .expect_find_platform_by_name()
            .times(3)
            .returning(|name| {
                Ok(Some(Platform {
                    platform_id: name.len() as i64,
                    platform_name: name.to_string(),
                }))
            });
        store
            .expect_create_influencer()
            .times(2)
            .returning(|new| Ok(influencer_from(7, new)));
        store.expect_create_account().never();

        let bytes = sheet(
            "Influencer Data",
            &INFLUENCER_HEADER,
            &[
                influencer_row("Aina", "", "", ["", "", "", "", ""]),
                influencer_row("Ben", "", "", ["", "", "", "", ""]),
            ],
        );

        let report = import_influencers(&store, &bytes, &InfluencerColumns::default())
            .await
            .unwrap();
        assert_eq!(report.imported.len(), 2);
    }

    #[tokio::test]
    async fn test_negative_followers_fail_row_before_parent_insert() {
        let store = MemoryStore::with_platforms(&["Instagram", "TikTok", "RedBook"]);
        let bytes = sheet(
            "Influencer Data",
            &INFLUENCER_HEADER,
            &[
                influencer_row("Aina", "", "", ["https://instagram.com/aina", "-5k", "", "", ""]),
                influencer_row("Ben", "", "", ["https://instagram.com/ben", "5k", "", "", ""]),
            ],
        );

        let report = import_influencers(&store, &bytes, &InfluencerColumns::default())
            .await
            .unwrap();

        assert_eq!(report.imported.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].row_number, 2);
        assert_eq!(report.failures[0].error.error_code(), "VALIDATION_ERROR");
        assert!(store.accounts.lock().unwrap().iter().all(|a| a.followers >= 0));
        assert_eq!(store.influencers.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_row_failure_keeps_store_message() {
        let failure = RowFailure {
            row_number: 2,
            error: AgencyError::from(sqlx::Error::PoolTimedOut),
        };

        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["rowNumber"], 2);
        assert_eq!(value["code"], "-1");
        assert_eq!(value["message"], sqlx::Error::PoolTimedOut.to_string());
        assert!(value["meta"].is_null());
    }
}
