//! 健康检查处理器
//!
//! `/health` 与 `/ready` 供探针使用，无需认证；`/api/v1/health` 仅管理员可访问

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::warn;

use crate::dto::{ApiResponse, HealthDto};
use crate::state::AppState;

const SERVICE_NAME: &str = "agency-api";

/// 存活探针：服务进程正常即返回 ok
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪探针：数据库不可用时返回 503
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db_ok = match state.db.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(code = e.code(), error = %e, "Readiness check failed");
            false
        }
    };

    let status = if db_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if db_ok { "ok" } else { "degraded" },
            "service": SERVICE_NAME,
            "checks": {
                "database": if db_ok { "ok" } else { "fail" }
            }
        })),
    )
}

/// 管理员健康检查：数据库连通性与进程运行时长
///
/// GET /api/v1/health
pub async fn admin_health(State(state): State<AppState>) -> Json<ApiResponse<HealthDto>> {
    let db_ok = state.db.health_check().await.is_ok();

    Json(ApiResponse::success(HealthDto {
        status: if db_ok { "ok" } else { "degraded" },
        database: if db_ok { "up" } else { "down" },
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}
