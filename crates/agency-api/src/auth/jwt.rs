//! JWT Token 处理
//!
//! 提供 JWT Token 的生成和验证功能，签名算法为 HS256

use agency_shared::config::AuthConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::role::Role;
use crate::error::{AgencyError, Result};

/// JWT 配置
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 签名密钥
    pub secret: String,
    /// Token 过期时间（秒）
    pub expires_in_secs: i64,
    /// Token 签发者
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        AuthConfig::default().into()
    }
}

impl From<AuthConfig> for JwtConfig {
    fn from(config: AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret,
            expires_in_secs: config.jwt_expires_secs,
            issuer: config.jwt_issuer,
        }
    }
}

/// JWT Claims（Token 载荷）
///
/// role 以字符串形式保存，解析为 [`Role`] 的工作交给访问守卫。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// 用户 ID
    pub sub: String,
    /// 用户名
    pub username: String,
    /// 角色
    pub role: String,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// 签发者
    pub iss: String,
}

/// JWT 管理器
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    /// 创建 JWT 管理器
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// 生成 JWT Token，返回 token 与过期时间戳
    pub fn generate_token(&self, user_id: i64, username: &str, role: Role) -> Result<(String, i64)> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.expires_in_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok((token, exp.timestamp()))
    }

    /// 验证并解析 JWT Token
    ///
    /// 校验签名、过期时间与签发者，任何一项失败都返回错误
    pub fn verify_token(&self, token: &str) -> jsonwebtoken::errors::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }

    /// 刷新 Token
    ///
    /// 基于现有身份生成新的 Token（延长过期时间）
    pub fn refresh_token(&self, user_id: i64, username: &str, role: Role) -> Result<(String, i64)> {
        if user_id <= 0 {
            return Err(AgencyError::Internal("无效的用户 ID".to_string()));
        }
        self.generate_token(user_id, username, role)
    }
}
