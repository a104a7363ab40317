//! 基于角色的访问守卫
//!
//! 从 `Authorization: Bearer <token>` 中解析调用方身份，并与路由声明的允许角色集合比对。
//! 判定过程无副作用，所有拒绝路径都不会返回错误，只会给出拒绝结论。

use axum::http::{HeaderMap, header::AUTHORIZATION};
use serde::Serialize;

use super::jwt::JwtManager;
use super::role::{Role, RoleSet};

const BEARER_PREFIX: &str = "Bearer ";

/// 已认证的调用方身份，授权通过后注入请求扩展
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

/// 访问判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// 缺少或无法识别的 Authorization header
    Unauthenticated,
    /// 签名、过期时间、签发者或载荷校验失败
    TokenInvalid,
    /// 身份有效，但角色不在允许集合中
    Denied(AuthUser),
    Granted(AuthUser),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// 用于日志与指标的标签
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::TokenInvalid => "token_invalid",
            Self::Denied(_) => "denied",
            Self::Granted(_) => "granted",
        }
    }
}

/// 访问守卫
#[derive(Clone)]
pub struct AccessGuard {
    jwt: JwtManager,
}

impl AccessGuard {
    pub fn new(jwt: JwtManager) -> Self {
        Self { jwt }
    }

    /// 完整判定：Unauthenticated → TokenInvalid | (Denied | Granted)
    pub fn evaluate(&self, headers: &HeaderMap, allowed: RoleSet) -> AccessDecision {
        let Some(token) = bearer_token(headers) else {
            return AccessDecision::Unauthenticated;
        };

        let Ok(claims) = self.jwt.verify_token(token) else {
            return AccessDecision::TokenInvalid;
        };

        let (Ok(user_id), Ok(role)) = (claims.sub.parse::<i64>(), claims.role.parse::<Role>())
        else {
            return AccessDecision::TokenInvalid;
        };

        let user = AuthUser {
            user_id,
            username: claims.username,
            role,
        };

        if allowed.contains(role) {
            AccessDecision::Granted(user)
        } else {
            AccessDecision::Denied(user)
        }
    }

    /// 调用方是否被允许访问
    pub fn authorize(&self, headers: &HeaderMap, allowed: RoleSet) -> bool {
        self.evaluate(headers, allowed).is_granted()
    }
}

/// 提取 Bearer token，scheme 区分大小写，token 不能为空
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtConfig;
    use axum::http::HeaderValue;

    fn guard() -> AccessGuard {
        AccessGuard::new(JwtManager::new(JwtConfig::default()))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn bearer_for(manager: &JwtManager, role: Role) -> HeaderMap {
        let (token, _) = manager.generate_token(5, "carol", role).unwrap();
        headers_with(&format!("Bearer {token}"))
    }

    fn all_sets() -> [RoleSet; 7] {
        [
            RoleSet::EMPTY,
            RoleSet::ADMIN,
            RoleSet::CLIENT,
            RoleSet::INFLUENCER,
            RoleSet::ADMIN_CLIENT,
            RoleSet::ADMIN_INFLUENCER,
            RoleSet::ALL,
        ]
    }

    #[test]
    fn test_missing_header_denied_for_every_set() {
        let guard = guard();
        for set in all_sets() {
            assert!(!guard.authorize(&HeaderMap::new(), set), "{set}");
            assert_eq!(
                guard.evaluate(&HeaderMap::new(), set),
                AccessDecision::Unauthenticated
            );
        }
    }

    #[test]
    fn test_malformed_headers_are_unauthenticated() {
        let guard = guard();
        let manager = JwtManager::new(JwtConfig::default());
        let (token, _) = manager.generate_token(1, "a", Role::Admin).unwrap();

        for value in [
            "".to_string(),
            "Bearer".to_string(),
            "Bearer ".to_string(),
            format!("bearer {token}"),
            format!("Basic {token}"),
            token.clone(),
        ] {
            assert_eq!(
                guard.evaluate(&headers_with(&value), RoleSet::ALL),
                AccessDecision::Unauthenticated,
                "{value}"
            );
        }
    }

    #[test]
    fn test_expired_token_denied_even_with_matching_role() {
        let expired = JwtManager::new(JwtConfig {
            expires_in_secs: -3600,
            ..JwtConfig::default()
        });
        let headers = bearer_for(&expired, Role::Admin);

        assert!(!guard().authorize(&headers, RoleSet::ADMIN));
        assert_eq!(
            guard().evaluate(&headers, RoleSet::ADMIN),
            AccessDecision::TokenInvalid
        );
    }

    #[test]
    fn test_client_against_admin_only_is_denied() {
        let manager = JwtManager::new(JwtConfig::default());
        let headers = bearer_for(&manager, Role::Client);

        assert!(!guard().authorize(&headers, RoleSet::ADMIN));
        assert!(matches!(
            guard().evaluate(&headers, RoleSet::ADMIN),
            AccessDecision::Denied(AuthUser { role: Role::Client, .. })
        ));
    }

    #[test]
    fn test_client_against_admin_client_is_granted() {
        let manager = JwtManager::new(JwtConfig::default());
        let headers = bearer_for(&manager, Role::Client);

        assert!(guard().authorize(&headers, RoleSet::ADMIN_CLIENT));
        assert_eq!(
            guard().evaluate(&headers, RoleSet::ADMIN_CLIENT),
            AccessDecision::Granted(AuthUser {
                user_id: 5,
                username: "carol".to_string(),
                role: Role::Client,
            })
        );
    }

    #[test]
    fn test_empty_set_grants_nobody() {
        let manager = JwtManager::new(JwtConfig::default());
        for role in Role::ALL {
            assert!(!guard().authorize(&bearer_for(&manager, role), RoleSet::EMPTY));
        }
    }

    #[test]
    fn test_grant_matrix() {
        let manager = JwtManager::new(JwtConfig::default());
        for role in Role::ALL {
            let headers = bearer_for(&manager, role);
            for set in all_sets() {
                assert_eq!(guard().authorize(&headers, set), set.contains(role), "{role} in {set}");
            }
        }
    }

    #[test]
    fn test_foreign_issuer_and_secret_denied() {
        let foreign_issuer = JwtManager::new(JwtConfig {
            issuer: "elsewhere".to_string(),
            ..JwtConfig::default()
        });
        let foreign_secret = JwtManager::new(JwtConfig {
            secret: "another-secret".to_string(),
            ..JwtConfig::default()
        });

        for manager in [foreign_issuer, foreign_secret] {
            let headers = bearer_for(&manager, Role::Admin);
            assert_eq!(
                guard().evaluate(&headers, RoleSet::ALL),
                AccessDecision::TokenInvalid
            );
        }
    }

    #[test]
    fn test_unknown_role_claim_denied() {
        use jsonwebtoken::{EncodingKey, Header, encode};

        let config = JwtConfig::default();
        let now = chrono::Utc::now().timestamp();
        let claims = crate::auth::Claims {
            sub: "1".to_string(),
            username: "mallory".to_string(),
            role: "Superuser".to_string(),
            iat: now,
            exp: now + 600,
            iss: config.issuer.clone(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let headers = headers_with(&format!("Bearer {token}"));
        assert!(!guard().authorize(&headers, RoleSet::ALL));
        assert_eq!(
            guard().evaluate(&headers, RoleSet::ALL),
            AccessDecision::TokenInvalid
        );
    }
}
