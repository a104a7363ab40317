//! 服务错误类型定义
//!
//! 存储层错误在这里被归类为约束冲突（带存储错误码）或未知错误（错误码 "-1"）。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use sqlx::error::ErrorKind;

/// 未识别的存储错误统一使用的错误码
pub const UNKNOWN_ERROR_CODE: &str = "-1";

const GENERIC_INTERNAL_MESSAGE: &str = "服务内部错误，请稍后重试";

/// 服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum AgencyError {
    #[error("参数验证失败: {0}")]
    Validation(String),

    #[error("用户名、角色或密码错误")]
    InvalidCredentials,

    /// 鉴权拒绝，不携带任何细节
    #[error("禁止访问")]
    Forbidden,

    #[error("{entity} 不存在: id={id}")]
    NotFound { entity: &'static str, id: i64 },

    /// 存储层约束冲突（唯一键、外键、非空、检查约束）
    #[error("数据约束冲突: {message}")]
    Constraint {
        code: String,
        message: String,
        meta: Value,
    },

    #[error("文件处理失败: {0}")]
    FileProcessing(String),

    /// 无法归类的存储错误
    #[error("未知错误: {0}")]
    Unknown(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl AgencyError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Constraint { .. } => StatusCode::CONFLICT,
            Self::FileProcessing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unknown(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    ///
    /// 约束冲突返回存储层的 SQLSTATE，例如唯一键冲突为 `23505`。
    pub fn error_code(&self) -> &str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Constraint { code, .. } => code,
            Self::FileProcessing(_) => "FILE_PROCESSING_ERROR",
            Self::Unknown(_) => UNKNOWN_ERROR_CODE,
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 面向调用方的消息
    ///
    /// 未归类的存储错误保留原始消息；JWT / bcrypt 等内部错误只返回通用提示。
    pub fn public_message(&self) -> String {
        match self {
            Self::Unknown(message) => message.clone(),
            Self::Internal(_) => GENERIC_INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// 附加数据，仅约束冲突携带
    pub fn meta(&self) -> Option<&Value> {
        match self {
            Self::Constraint { meta, .. } => Some(meta),
            _ => None,
        }
    }
}

impl IntoResponse for AgencyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Unknown(e) => tracing::error!(error = %e, "Unclassified store error"),
            Self::Internal(e) => tracing::error!(error = %e, "Internal error"),
            Self::Constraint { code, meta, .. } => {
                tracing::warn!(code = %code, meta = %meta, "Store constraint violated")
            }
            _ => {}
        }

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": self.public_message(),
            "data": self.meta().cloned().unwrap_or(Value::Null)
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 存储错误归类
///
/// 带错误码的约束类错误转换为 `Constraint`，其余全部转换为 `Unknown`。
impl From<sqlx::Error> for AgencyError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let is_constraint = matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            );
            if let (true, Some(code)) = (is_constraint, db_err.code()) {
                return Self::Constraint {
                    code: code.into_owned(),
                    message: db_err.message().to_string(),
                    meta: json!({
                        "constraint": db_err.constraint(),
                        "table": db_err.table(),
                    }),
                };
            }
        }
        Self::Unknown(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AgencyError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<calamine::Error> for AgencyError {
    fn from(err: calamine::Error) -> Self {
        Self::FileProcessing(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AgencyError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Internal(format!("JWT 处理错误: {}", err))
    }
}

impl From<bcrypt::BcryptError> for AgencyError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("密码处理错误: {}", err))
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, AgencyError>;
