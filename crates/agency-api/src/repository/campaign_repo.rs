//! 活动与预约仓储

use std::collections::HashMap;

use sqlx::PgPool;

use crate::error::{AgencyError, Result};
use crate::models::{
    Booking, BookingChanges, Campaign, CampaignChanges, CampaignWithClient, Client, NewBooking,
    NewCampaign,
};

const CAMPAIGN_COLUMNS: &str = r#"
    campaign_id, client_id, campaign_name, food_offering, campaign_address, package, feedback,
    max_pax, booking_availability, availability_public_holiday, start_date, end_date, is_halal,
    slots, slot_status, is_result, campaign_status, created_at, updated_at
"#;

const BOOKING_COLUMNS: &str = r#"
    booking_id, campaign_id, influencer_id, campaign_name, full_name, booking_datetime, pax_no,
    booking_type, social_media_handler, is_due, social_media_post, review_posted, is_completed,
    influencer_response_date, created_at, updated_at
"#;

pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 活动 ====================

    /// 列出所有活动，每个活动附带所属客户
    pub async fn list_campaigns(&self) -> Result<Vec<CampaignWithClient>> {
        let campaigns = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns ORDER BY campaign_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let client_ids: Vec<i64> = campaigns.iter().map(|c| c.client_id).collect();
        let clients: HashMap<i64, Client> = self
            .clients_by_ids(&client_ids)
            .await?
            .into_iter()
            .map(|c| (c.client_id, c))
            .collect();

        campaigns
            .into_iter()
            .map(|campaign| {
                let client = clients
                    .get(&campaign.client_id)
                    .cloned()
                    .ok_or_else(|| AgencyError::not_found("client", campaign.client_id))?;
                Ok(CampaignWithClient { campaign, client })
            })
            .collect()
    }

    pub async fn get_campaign(&self, id: i64) -> Result<Option<CampaignWithClient>> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE campaign_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(campaign) = campaign else {
            return Ok(None);
        };

        let client = self
            .clients_by_ids(&[campaign.client_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AgencyError::not_found("client", campaign.client_id))?;

        Ok(Some(CampaignWithClient { campaign, client }))
    }

    async fn clients_by_ids(&self, ids: &[i64]) -> Result<Vec<Client>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT client_id, company_name, person_in_charge_name, company_email, pic_email,
                   contact_number, additional_contact_number, industry, category, package,
                   is_halal, created_at, updated_at
            FROM clients
            WHERE client_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    pub async fn create_campaign(&self, campaign: &NewCampaign) -> Result<Campaign> {
        let created = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            INSERT INTO campaigns (
                client_id, campaign_name, food_offering, campaign_address, package, feedback,
                max_pax, booking_availability, availability_public_holiday, start_date, end_date,
                is_halal, slots, slot_status, is_result, campaign_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(campaign.client_id)
        .bind(&campaign.campaign_name)
        .bind(&campaign.food_offering)
        .bind(&campaign.campaign_address)
        .bind(&campaign.package)
        .bind(&campaign.feedback)
        .bind(campaign.max_pax)
        .bind(&campaign.booking_availability)
        .bind(&campaign.availability_public_holiday)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(campaign.is_halal)
        .bind(campaign.slots)
        .bind(&campaign.slot_status)
        .bind(campaign.is_result)
        .bind(&campaign.campaign_status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// 部分更新，日期先后顺序由 campaigns_date_range_check 约束保证
    pub async fn update_campaign(
        &self,
        id: i64,
        changes: &CampaignChanges,
    ) -> Result<Option<Campaign>> {
        let updated = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            UPDATE campaigns SET
                campaign_name = COALESCE($2, campaign_name),
                food_offering = COALESCE($3, food_offering),
                campaign_address = COALESCE($4, campaign_address),
                package = COALESCE($5, package),
                feedback = COALESCE($6, feedback),
                max_pax = COALESCE($7, max_pax),
                booking_availability = COALESCE($8, booking_availability),
                availability_public_holiday = COALESCE($9, availability_public_holiday),
                start_date = COALESCE($10, start_date),
                end_date = COALESCE($11, end_date),
                is_halal = COALESCE($12, is_halal),
                slots = COALESCE($13, slots),
                slot_status = COALESCE($14, slot_status),
                is_result = COALESCE($15, is_result),
                campaign_status = COALESCE($16, campaign_status),
                updated_at = NOW()
            WHERE campaign_id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.campaign_name)
        .bind(&changes.food_offering)
        .bind(&changes.campaign_address)
        .bind(&changes.package)
        .bind(&changes.feedback)
        .bind(changes.max_pax)
        .bind(&changes.booking_availability)
        .bind(&changes.availability_public_holiday)
        .bind(changes.start_date)
        .bind(changes.end_date)
        .bind(changes.is_halal)
        .bind(changes.slots)
        .bind(&changes.slot_status)
        .bind(changes.is_result)
        .bind(&changes.campaign_status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// 删除活动，相关预约级联删除
    pub async fn delete_campaign(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM campaigns WHERE campaign_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ==================== 预约 ====================

    pub async fn list_bookings(&self, campaign_id: i64) -> Result<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE campaign_id = $1 ORDER BY booking_datetime ASC, booking_id ASC"
        ))
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn get_booking(&self, id: i64) -> Result<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// 创建预约，活动名称与达人姓名从关联记录中复制
    ///
    /// 活动或达人不存在时返回 None。
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Option<Booking>> {
        let created = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (
                campaign_id, influencer_id, campaign_name, full_name, booking_datetime, pax_no,
                booking_type, social_media_handler, is_due, social_media_post, review_posted,
                is_completed, influencer_response_date
            )
            SELECT c.campaign_id, i.influencer_id, c.campaign_name, i.full_name,
                   $3, $4, $5, $6, $7, $8, $9, $10, $11
            FROM campaigns c, influencers i
            WHERE c.campaign_id = $1 AND i.influencer_id = $2
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking.campaign_id)
        .bind(booking.influencer_id)
        .bind(booking.booking_datetime)
        .bind(booking.pax_no)
        .bind(&booking.booking_type)
        .bind(&booking.social_media_handler)
        .bind(booking.is_due)
        .bind(&booking.social_media_post)
        .bind(booking.review_posted)
        .bind(booking.is_completed)
        .bind(booking.influencer_response_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn update_booking(
        &self,
        id: i64,
        changes: &BookingChanges,
    ) -> Result<Option<Booking>> {
        let updated = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings SET
                booking_datetime = COALESCE($2, booking_datetime),
                pax_no = COALESCE($3, pax_no),
                booking_type = COALESCE($4, booking_type),
                social_media_handler = COALESCE($5, social_media_handler),
                is_due = COALESCE($6, is_due),
                social_media_post = COALESCE($7, social_media_post),
                review_posted = COALESCE($8, review_posted),
                is_completed = COALESCE($9, is_completed),
                influencer_response_date = COALESCE($10, influencer_response_date),
                updated_at = NOW()
            WHERE booking_id = $1
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.booking_datetime)
        .bind(changes.pax_no)
        .bind(&changes.booking_type)
        .bind(&changes.social_media_handler)
        .bind(changes.is_due)
        .bind(&changes.social_media_post)
        .bind(changes.review_posted)
        .bind(changes.is_completed)
        .bind(changes.influencer_response_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete_booking(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
