//! 客户仓储
//!
//! 客户公司及其门店地址的数据访问

use async_trait::async_trait;
use sqlx::{PgExecutor, PgPool};

use super::traits::ClientStore;
use crate::error::Result;
use crate::models::{
    Client, ClientChanges, ClientLocation, ClientWithLocations, LocationChanges, NewClient,
    NewLocation,
};

const CLIENT_COLUMNS: &str = r#"
    client_id, company_name, person_in_charge_name, company_email, pic_email,
    contact_number, additional_contact_number, industry, category, package,
    is_halal, created_at, updated_at
"#;

const LOCATION_COLUMNS: &str =
    "client_location_id, client_id, address, city, state, postcode, country, created_at, updated_at";

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 客户 ====================

    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY client_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    pub async fn get_client(&self, id: i64) -> Result<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients WHERE client_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// 获取客户及其全部门店地址
    pub async fn get_client_with_locations(&self, id: i64) -> Result<Option<ClientWithLocations>> {
        let Some(client) = self.get_client(id).await? else {
            return Ok(None);
        };
        let locations = self.list_locations(id).await?;

        Ok(Some(ClientWithLocations { client, locations }))
    }

    pub async fn create_client(&self, client: &NewClient) -> Result<Client> {
        insert_client(&self.pool, client).await
    }

    /// 在同一事务中创建客户及其门店地址
    pub async fn create_client_with_locations(
        &self,
        client: &NewClient,
        locations: &[NewLocation],
    ) -> Result<ClientWithLocations> {
        let mut tx = self.pool.begin().await?;

        let created = insert_client(&mut *tx, client).await?;
        let mut persisted = Vec::with_capacity(locations.len());
        for location in locations {
            persisted.push(insert_location(&mut *tx, created.client_id, location).await?);
        }

        tx.commit().await?;

        Ok(ClientWithLocations {
            client: created,
            locations: persisted,
        })
    }

    pub async fn update_client(&self, id: i64, changes: &ClientChanges) -> Result<Option<Client>> {
        let updated = sqlx::query_as::<_, Client>(&format!(
            r#"
            UPDATE clients SET
                company_name = COALESCE($2, company_name),
                person_in_charge_name = COALESCE($3, person_in_charge_name),
                company_email = COALESCE($4, company_email),
                pic_email = COALESCE($5, pic_email),
                contact_number = COALESCE($6, contact_number),
                additional_contact_number = COALESCE($7, additional_contact_number),
                industry = COALESCE($8, industry),
                category = COALESCE($9, category),
                package = COALESCE($10, package),
                is_halal = COALESCE($11, is_halal),
                updated_at = NOW()
            WHERE client_id = $1
            RETURNING {CLIENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.company_name)
        .bind(&changes.person_in_charge_name)
        .bind(&changes.company_email)
        .bind(&changes.pic_email)
        .bind(&changes.contact_number)
        .bind(&changes.additional_contact_number)
        .bind(&changes.industry)
        .bind(&changes.category)
        .bind(&changes.package)
        .bind(changes.is_halal)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// 删除客户，门店地址与活动级联删除
    pub async fn delete_client(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE client_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ==================== 门店地址 ====================

    pub async fn list_locations(&self, client_id: i64) -> Result<Vec<ClientLocation>> {
        let locations = sqlx::query_as::<_, ClientLocation>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM client_locations WHERE client_id = $1 ORDER BY client_location_id ASC"
        ))
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    pub async fn create_location(
        &self,
        client_id: i64,
        location: &NewLocation,
    ) -> Result<ClientLocation> {
        insert_location(&self.pool, client_id, location).await
    }

    pub async fn update_location(
        &self,
        id: i64,
        changes: &LocationChanges,
    ) -> Result<Option<ClientLocation>> {
        let updated = sqlx::query_as::<_, ClientLocation>(&format!(
            r#"
            UPDATE client_locations SET
                address = COALESCE($2, address),
                city = COALESCE($3, city),
                state = COALESCE($4, state),
                postcode = COALESCE($5, postcode),
                country = COALESCE($6, country),
                updated_at = NOW()
            WHERE client_location_id = $1
            RETURNING {LOCATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.address)
        .bind(&changes.city)
        .bind(&changes.state)
        .bind(&changes.postcode)
        .bind(&changes.country)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete_location(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM client_locations WHERE client_location_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_client<'e, E: PgExecutor<'e>>(executor: E, client: &NewClient) -> Result<Client> {
    let created = sqlx::query_as::<_, Client>(&format!(
        r#"
        INSERT INTO clients (
            company_name, person_in_charge_name, company_email, pic_email, contact_number,
            additional_contact_number, industry, category, package, is_halal
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {CLIENT_COLUMNS}
        "#
    ))
    .bind(&client.company_name)
    .bind(&client.person_in_charge_name)
    .bind(&client.company_email)
    .bind(&client.pic_email)
    .bind(&client.contact_number)
    .bind(&client.additional_contact_number)
    .bind(&client.industry)
    .bind(&client.category)
    .bind(&client.package)
    .bind(client.is_halal)
    .fetch_one(executor)
    .await?;

    Ok(created)
}

async fn insert_location<'e, E: PgExecutor<'e>>(
    executor: E,
    client_id: i64,
    location: &NewLocation,
) -> Result<ClientLocation> {
    let created = sqlx::query_as::<_, ClientLocation>(&format!(
        r#"
        INSERT INTO client_locations (client_id, address, city, state, postcode, country)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {LOCATION_COLUMNS}
        "#
    ))
    .bind(client_id)
    .bind(&location.address)
    .bind(&location.city)
    .bind(&location.state)
    .bind(&location.postcode)
    .bind(&location.country)
    .fetch_one(executor)
    .await?;

    Ok(created)
}

#[async_trait]
impl ClientStore for ClientRepository {
    async fn create_client(&self, client: &NewClient) -> Result<Client> {
        self.create_client(client).await
    }

    async fn create_location(
        &self,
        client_id: i64,
        location: &NewLocation,
    ) -> Result<ClientLocation> {
        self.create_location(client_id, location).await
    }
}
