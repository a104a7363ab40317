//! 达人营销代理后台服务
//!
//! 提供资源管理、批量导入与角色访问控制的 REST API。

use agency_api::{auth::JwtConfig, import::ImportConfig, middleware::security_headers, routes, state::AppState};
use agency_shared::{
    config::{AppConfig, CorsConfig},
    database::Database,
    observability::{self, middleware as obs_middleware},
};
use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

const SERVICE_NAME: &str = "agency-api";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 统一加载配置：default.toml → {env}.toml → agency-api.toml → 环境变量
    let config = AppConfig::load(SERVICE_NAME)?;
    config.validate()?;

    let _guard = observability::init(&config.service_name, &config.observability).await?;

    info!("Starting {} on {}", config.service_name, config.server_addr());

    let db = Database::connect(&config.database).await?;
    if config.database.run_migrations {
        db.run_migrations().await?;
    }

    let import_config = load_import_config()?;
    let state = AppState::new(db.clone(), JwtConfig::from(config.auth.clone()), import_config);

    let app = routes::app(state)
        .layer(DefaultBodyLimit::max(config.server.max_upload_bytes))
        // HTTP 安全头：即使反向代理未配置也确保基本安全策略生效
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer(&config.cors))
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id));

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：收到 SIGTERM 或 Ctrl+C 时停止接收新连接，等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// 读取 `[import]` 配置段，未配置时使用默认列标题
fn load_import_config() -> anyhow::Result<ImportConfig> {
    match AppConfig::sources(SERVICE_NAME)?.get::<ImportConfig>("import") {
        Ok(import) => Ok(import),
        Err(config::ConfigError::NotFound(_)) => {
            info!("No import section configured, using default column labels");
            Ok(ImportConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// 根据配置构建 CORS 层
///
/// 未配置或包含 `*` 时允许任意来源
fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors.allowed_origins.is_empty() || cors.allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

/// 监听关闭信号
///
/// 收到 SIGTERM 或 Ctrl+C 后返回，触发 axum 的优雅关闭流程。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
