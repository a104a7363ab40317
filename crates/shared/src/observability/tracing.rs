//! 日志初始化模块
//!
//! 基于 tracing-subscriber，支持 EnvFilter 过滤以及 json / pretty 两种输出格式。

use anyhow::Result;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::ObservabilityConfig;

/// 构建环境过滤器
///
/// RUST_LOG 优先，其次是配置中的日志级别，两者都无效时回退到 info。
pub fn build_env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 是否输出 JSON 格式日志
pub fn is_json_format(log_format: &str) -> bool {
    log_format.eq_ignore_ascii_case("json")
}

/// 初始化全局日志订阅者
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    let env_filter = build_env_filter(&config.log_level);

    let fmt_layer = if is_json_format(&config.log_format) {
        fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_json_format() {
        assert!(is_json_format("json"));
        assert!(is_json_format("JSON"));
        assert!(!is_json_format("pretty"));
        assert!(!is_json_format(""));
    }

    #[test]
    fn test_invalid_level_falls_back() {
        // 非法的过滤表达式不应该 panic
        let _ = build_env_filter("not a [valid filter");
    }
}
