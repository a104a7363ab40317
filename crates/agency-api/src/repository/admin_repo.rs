//! 管理员档案仓储

use sqlx::PgPool;

use crate::error::Result;
use crate::models::{Admin, AdminChanges, NewAdmin};

const ADMIN_COLUMNS: &str = "admin_id, full_name, preferred_name, contact_number, email_address, created_at, updated_at";

pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Admin>> {
        let admins = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins ORDER BY admin_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(admins)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE admin_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    pub async fn create(&self, admin: &NewAdmin) -> Result<Admin> {
        let created = sqlx::query_as::<_, Admin>(&format!(
            r#"
            INSERT INTO admins (full_name, preferred_name, contact_number, email_address)
            VALUES ($1, $2, $3, $4)
            RETURNING {ADMIN_COLUMNS}
            "#
        ))
        .bind(&admin.full_name)
        .bind(&admin.preferred_name)
        .bind(&admin.contact_number)
        .bind(&admin.email_address)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// 部分更新，记录不存在时返回 None
    pub async fn update(&self, id: i64, changes: &AdminChanges) -> Result<Option<Admin>> {
        let updated = sqlx::query_as::<_, Admin>(&format!(
            r#"
            UPDATE admins SET
                full_name = COALESCE($2, full_name),
                preferred_name = COALESCE($3, preferred_name),
                contact_number = COALESCE($4, contact_number),
                email_address = COALESCE($5, email_address),
                updated_at = NOW()
            WHERE admin_id = $1
            RETURNING {ADMIN_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.full_name)
        .bind(&changes.preferred_name)
        .bind(&changes.contact_number)
        .bind(&changes.email_address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// 删除记录，返回是否存在
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM admins WHERE admin_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
