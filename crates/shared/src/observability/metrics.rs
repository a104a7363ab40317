//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Metrics 资源守卫
pub struct MetricsHandle {
    _server_handle: tokio::task::JoinHandle<()>,
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(service_name: &str, port: u16) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    register_common_metrics(service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle {
        _server_handle: server_handle,
    })
}

/// 注册通用指标描述
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!(
        "import_rows_total",
        "Spreadsheet rows processed by bulk import"
    );
    metrics::describe_histogram!(
        "import_duration_seconds",
        "Bulk import duration in seconds"
    );

    metrics::describe_counter!(
        "auth_decisions_total",
        "Role guard decisions by outcome"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 启动指标 HTTP 服务器
async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 记录导入结果
///
/// `entity` 为 client / influencer，按成功与失败分别计数。
#[inline]
pub fn record_import(entity: &str, imported: usize, failed: usize, duration_secs: f64) {
    metrics::counter!(
        "import_rows_total",
        "entity" => entity.to_string(),
        "status" => "imported"
    )
    .increment(imported as u64);

    metrics::counter!(
        "import_rows_total",
        "entity" => entity.to_string(),
        "status" => "failed"
    )
    .increment(failed as u64);

    metrics::histogram!(
        "import_duration_seconds",
        "entity" => entity.to_string()
    )
    .record(duration_secs);
}

/// 记录鉴权判定
#[inline]
pub fn record_auth_decision(decision: &'static str) {
    metrics::counter!("auth_decisions_total", "decision" => decision).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_functions_do_not_panic() {
        // 即使没有初始化 recorder，这些函数也不应该 panic
        record_http_request("GET", "/api/v1/clients", 200, 0.1);
        record_import("client", 3, 1, 0.2);
        record_auth_decision("granted");
        record_auth_decision("denied");
    }
}
