//! 用户仓储
//!
//! 角色以文本形式存储，读取时解析为 [`Role`]

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::auth::Role;
use crate::error::{AgencyError, Result};
use crate::models::{NewUser, User, UserChanges};

const USER_COLUMNS: &str = r#"
    user_id, full_name, preferred_name, contact_number, email_address, username,
    password_hash, role, created_at, updated_at
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    full_name: String,
    preferred_name: String,
    contact_number: String,
    email_address: String,
    username: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AgencyError;

    fn try_from(row: UserRow) -> Result<Self> {
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| AgencyError::Internal(format!("用户 {} 的角色无效: {}", row.user_id, e)))?;

        Ok(Self {
            user_id: row.user_id,
            full_name: row.full_name,
            preferred_name: row.preferred_name,
            contact_number: row.contact_number,
            email_address: row.email_address,
            username: row.username,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY user_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    pub async fn create(&self, user: &NewUser) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (
                full_name, preferred_name, contact_number, email_address, username,
                password_hash, role
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.full_name)
        .bind(&user.preferred_name)
        .bind(&user.contact_number)
        .bind(&user.email_address)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        User::try_from(row)
    }

    pub async fn update(&self, id: i64, changes: &UserChanges) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                full_name = COALESCE($2, full_name),
                preferred_name = COALESCE($3, preferred_name),
                contact_number = COALESCE($4, contact_number),
                email_address = COALESCE($5, email_address),
                password_hash = COALESCE($6, password_hash),
                role = COALESCE($7, role),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&changes.full_name)
        .bind(&changes.preferred_name)
        .bind(&changes.contact_number)
        .bind(&changes.email_address)
        .bind(&changes.password_hash)
        .bind(changes.role.as_ref().map(Role::as_str))
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
