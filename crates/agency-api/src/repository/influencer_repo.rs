//! 达人仓储
//!
//! 达人、社交账号与平台字典的数据访问。账号查询总是带出平台名称。

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use super::traits::InfluencerStore;
use crate::error::Result;
use crate::models::{
    Account, AccountChanges, Influencer, InfluencerChanges, InfluencerWithAccounts, NewAccount,
    NewInfluencer, Platform,
};

const INFLUENCER_COLUMNS: &str = r#"
    influencer_id, full_name, preferred_name, contact_number, additional_contact_number,
    email_address, country, city, state, postcode, multiple_countries, additional_country,
    industry, consent_whatsapp_group, whatsapp_invited, community, invite_count,
    created_at, updated_at
"#;

const ACCOUNT_SELECT: &str = r#"
    SELECT a.account_id, a.influencer_id, a.platform_id, p.platform_name, a.account_type,
           a.social_media_url, a.followers, a.created_at, a.updated_at
"#;

pub struct InfluencerRepository {
    pool: PgPool,
}

impl InfluencerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 达人 ====================

    /// 列出所有达人及其账号
    pub async fn list_influencers(&self) -> Result<Vec<InfluencerWithAccounts>> {
        let influencers = sqlx::query_as::<_, Influencer>(&format!(
            "SELECT {INFLUENCER_COLUMNS} FROM influencers ORDER BY influencer_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = influencers.iter().map(|i| i.influencer_id).collect();
        let mut accounts_by_owner: HashMap<i64, Vec<Account>> = HashMap::new();
        for account in self.list_accounts_for(&ids).await? {
            accounts_by_owner
                .entry(account.influencer_id)
                .or_default()
                .push(account);
        }

        Ok(influencers
            .into_iter()
            .map(|influencer| InfluencerWithAccounts {
                accounts: accounts_by_owner
                    .remove(&influencer.influencer_id)
                    .unwrap_or_default(),
                influencer,
            })
            .collect())
    }

    pub async fn get_influencer(&self, id: i64) -> Result<Option<InfluencerWithAccounts>> {
        let influencer = sqlx::query_as::<_, Influencer>(&format!(
            "SELECT {INFLUENCER_COLUMNS} FROM influencers WHERE influencer_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(influencer) = influencer else {
            return Ok(None);
        };
        let accounts = self.list_accounts_for(&[id]).await?;

        Ok(Some(InfluencerWithAccounts {
            influencer,
            accounts,
        }))
    }

    pub async fn create_influencer(&self, influencer: &NewInfluencer) -> Result<Influencer> {
        insert_influencer(&self.pool, influencer).await
    }

    /// 在同一事务中创建达人及其账号
    pub async fn create_influencer_with_accounts(
        &self,
        influencer: &NewInfluencer,
        accounts: &[NewAccount],
    ) -> Result<InfluencerWithAccounts> {
        let mut tx = self.pool.begin().await?;

        let created = insert_influencer(&mut *tx, influencer).await?;
        let mut persisted = Vec::with_capacity(accounts.len());
        for account in accounts {
            persisted.push(insert_account(&mut *tx, created.influencer_id, account).await?);
        }

        tx.commit().await?;

        Ok(InfluencerWithAccounts {
            influencer: created,
            accounts: persisted,
        })
    }

    pub async fn update_influencer(
        &self,
        id: i64,
        changes: &InfluencerChanges,
    ) -> Result<Option<Influencer>> {
        let updated = sqlx::query_as::<_, Influencer>(&format!(
            r#"
            UPDATE influencers SET
                full_name = COALESCE($2, full_name),
                preferred_name = COALESCE($3, preferred_name),
                contact_number = COALESCE($4, contact_number),
                additional_contact_number = COALESCE($5, additional_contact_number),
                email_address = COALESCE($6, email_address),
                country = COALESCE($7, country),
                city = COALESCE($8, city),
                state = COALESCE($9, state),
                postcode = COALESCE($10, postcode),
                multiple_countries = COALESCE($11, multiple_countries),
                additional_country = COALESCE($12, additional_country),
                industry = COALESCE($13, industry),
                consent_whatsapp_group = COALESCE($14, consent_whatsapp_group),
                whatsapp_invited = COALESCE($15, whatsapp_invited),
                community = COALESCE($16, community),
                invite_count = COALESCE($17, invite_count),
                updated_at = NOW()
            WHERE influencer_id = $1
            RETURNING {INFLUENCER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.full_name)
        .bind(&changes.preferred_name)
        .bind(&changes.contact_number)
        .bind(&changes.additional_contact_number)
        .bind(&changes.email_address)
        .bind(&changes.country)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.postcode)
        .bind(changes.multiple_countries)
        .bind(&changes.additional_country)
        .bind(&changes.industry)
        .bind(changes.consent_whatsapp_group)
        .bind(changes.whatsapp_invited)
        .bind(changes.community)
        .bind(changes.invite_count)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// 删除达人，账号与预约级联删除
    pub async fn delete_influencer(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM influencers WHERE influencer_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ==================== 平台 ====================

    pub async fn list_platforms(&self) -> Result<Vec<Platform>> {
        let platforms = sqlx::query_as::<_, Platform>(
            "SELECT platform_id, platform_name FROM platforms ORDER BY platform_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(platforms)
    }

    pub async fn find_platform_by_name(&self, name: &str) -> Result<Option<Platform>> {
        let platform = sqlx::query_as::<_, Platform>(
            "SELECT platform_id, platform_name FROM platforms WHERE platform_name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(platform)
    }

    // ==================== 社交账号 ====================

    async fn list_accounts_for(&self, influencer_ids: &[i64]) -> Result<Vec<Account>> {
        if influencer_ids.is_empty() {
            return Ok(vec![]);
        }

        let accounts = sqlx::query_as::<_, Account>(&format!(
            r#"
            {ACCOUNT_SELECT}
            FROM accounts a
            JOIN platforms p ON p.platform_id = a.platform_id
            WHERE a.influencer_id = ANY($1)
            ORDER BY a.account_id ASC
            "#
        ))
        .bind(influencer_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    pub async fn get_account(&self, id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(&format!(
            r#"
            {ACCOUNT_SELECT}
            FROM accounts a
            JOIN platforms p ON p.platform_id = a.platform_id
            WHERE a.account_id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    pub async fn create_account(&self, influencer_id: i64, account: &NewAccount) -> Result<Account> {
        insert_account(&self.pool, influencer_id, account).await
    }

    pub async fn update_account(
        &self,
        id: i64,
        changes: &AccountChanges,
    ) -> Result<Option<Account>> {
        let updated = sqlx::query_as::<_, Account>(&format!(
            r#"
            WITH a AS (
                UPDATE accounts SET
                    platform_id = COALESCE($2, platform_id),
                    account_type = COALESCE($3, account_type),
                    social_media_url = COALESCE($4, social_media_url),
                    followers = COALESCE($5, followers),
                    updated_at = NOW()
                WHERE account_id = $1
                RETURNING *
            )
            {ACCOUNT_SELECT}
            FROM a
            JOIN platforms p ON p.platform_id = a.platform_id
            "#
        ))
        .bind(id)
        .bind(changes.platform_id)
        .bind(&changes.account_type)
        .bind(&changes.social_media_url)
        .bind(changes.followers)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete_account(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE account_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_influencer<'e, E: PgExecutor<'e>>(
    executor: E,
    influencer: &NewInfluencer,
) -> Result<Influencer> {
    let created = sqlx::query_as::<_, Influencer>(&format!(
        r#"
        INSERT INTO influencers (
            full_name, preferred_name, contact_number, additional_contact_number, email_address,
            country, city, state, postcode, multiple_countries, additional_country, industry,
            consent_whatsapp_group, whatsapp_invited, community, invite_count
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        RETURNING {INFLUENCER_COLUMNS}
        "#
    ))
    .bind(&influencer.full_name)
    .bind(&influencer.preferred_name)
    .bind(&influencer.contact_number)
    .bind(&influencer.additional_contact_number)
    .bind(&influencer.email_address)
    .bind(&influencer.country)
    .bind(&influencer.city)
    .bind(&influencer.state)
    .bind(&influencer.postcode)
    .bind(influencer.multiple_countries)
    .bind(&influencer.additional_country)
    .bind(&influencer.industry)
    .bind(influencer.consent_whatsapp_group)
    .bind(influencer.whatsapp_invited)
    .bind(influencer.community)
    .bind(influencer.invite_count)
    .fetch_one(executor)
    .await?;

    Ok(created)
}

async fn insert_account<'e, E: PgExecutor<'e>>(
    executor: E,
    influencer_id: i64,
    account: &NewAccount,
) -> Result<Account> {
    let created = sqlx::query_as::<_, Account>(&format!(
        r#"
        WITH a AS (
            INSERT INTO accounts (influencer_id, platform_id, account_type, social_media_url, followers)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
        )
        {ACCOUNT_SELECT}
        FROM a
        JOIN platforms p ON p.platform_id = a.platform_id
        "#
    ))
    .bind(influencer_id)
    .bind(account.platform_id)
    .bind(&account.account_type)
    .bind(&account.social_media_url)
    .bind(account.followers)
    .fetch_one(executor)
    .await?;

    Ok(created)
}

#[async_trait]
impl InfluencerStore for InfluencerRepository {
    async fn find_platform_by_name(&self, name: &str) -> Result<Option<Platform>> {
        self.find_platform_by_name(name).await
    }

    async fn create_influencer(&self, influencer: &NewInfluencer) -> Result<Influencer> {
        self.create_influencer(influencer).await
    }

    async fn create_account(&self, influencer_id: i64, account: &NewAccount) -> Result<Account> {
        self.create_account(influencer_id, account).await
    }
}
