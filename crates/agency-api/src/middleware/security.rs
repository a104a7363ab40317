//! HTTP 安全头

use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

/// 为所有响应注入 HTTP 安全头
///
/// 上游反向代理未配置时，应用层仍提供基本的浏览器安全策略。
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    // 旧的 XSS 过滤器显式禁用
    headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("0"));
    response
}
