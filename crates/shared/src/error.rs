//! 统一错误处理模块
//!
//! 定义基础设施层共享的错误类型，业务错误由各服务自行定义。

use thiserror::Error;

/// 基础设施错误类型
#[derive(Debug, Error)]
pub enum SharedError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("数据库迁移失败: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, SharedError>;

impl SharedError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Migration(_) => "MIGRATION_ERROR",
        }
    }
}
