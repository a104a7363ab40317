//! 角色访问中间件
//!
//! 在 handler 运行前调用 [`AccessGuard`] 判定，只有 Granted 的请求才会继续，
//! 调用方身份以 [`AuthUser`] 注入请求扩展。

use std::future::Future;
use std::pin::Pin;

use agency_shared::observability::metrics::record_auth_decision;
use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::auth::{AccessDecision, AccessGuard, RoleSet};
use crate::error::AgencyError;

/// 角色访问中间件工厂
///
/// # 示例
/// ```ignore
/// Router::new()
///     .route("/admins", get(list_admins))
///     .route_layer(axum::middleware::from_fn(require_roles(guard, RoleSet::ADMIN)))
/// ```
pub fn require_roles(
    guard: AccessGuard,
    allowed: RoleSet,
) -> impl Fn(Request<Body>, Next) -> Pin<Box<dyn Future<Output = Response> + Send>>
       + Clone
       + Send
       + Sync {
    move |request: Request<Body>, next: Next| {
        let guard = guard.clone();
        Box::pin(async move { check_roles(&guard, allowed, request, next).await })
    }
}

async fn check_roles(
    guard: &AccessGuard,
    allowed: RoleSet,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let decision = guard.evaluate(request.headers(), allowed);
    record_auth_decision(decision.label());

    match decision {
        AccessDecision::Granted(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        denied => {
            debug!(
                decision = denied.label(),
                allowed = %allowed,
                path = %request.uri().path(),
                "Access denied"
            );
            AgencyError::Forbidden.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::{Extension, Router, http::StatusCode, routing::get};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::{AuthUser, JwtConfig, JwtManager, Role};

    fn guard() -> (AccessGuard, JwtManager) {
        let jwt = JwtManager::new(JwtConfig::default());
        (AccessGuard::new(jwt.clone()), jwt)
    }

    fn app(guard: AccessGuard, allowed: RoleSet, hits: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/protected",
                get(move |Extension(user): Extension<AuthUser>| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        user.username
                    }
                }),
            )
            .route_layer(axum::middleware::from_fn(require_roles(guard, allowed)))
    }

    fn request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/protected");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_denied_request_never_reaches_handler() {
        let (guard, jwt) = guard();
        let hits = Arc::new(AtomicUsize::new(0));
        let (token, _) = jwt.generate_token(5, "kopi", Role::Client).unwrap();

        for token in [None, Some("garbage"), Some(token.as_str())] {
            let response = app(guard.clone(), RoleSet::ADMIN, hits.clone())
                .oneshot(request(token))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN);

            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(json["code"], "FORBIDDEN");
            assert_eq!(json["data"], serde_json::Value::Null);
        }

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_granted_request_exposes_auth_user() {
        let (guard, jwt) = guard();
        let hits = Arc::new(AtomicUsize::new(0));
        let (token, _) = jwt.generate_token(5, "kopi", Role::Client).unwrap();

        let response = app(guard, RoleSet::ADMIN_CLIENT, hits.clone())
            .oneshot(request(Some(&token)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"kopi");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
