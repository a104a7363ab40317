//! 达人营销代理后台服务
//!
//! 为管理员、客户与达人三类角色提供 REST API。
//!
//! ## 核心功能
//!
//! - **资源管理**：管理员、客户及门店地址、营销活动、预约、达人及社交账号的 CRUD
//! - **批量导入**：从 Excel 表格导入客户与达人，逐行对账并返回失败明细
//! - **访问控制**：JWT Bearer Token 认证，按路由声明的角色集合授权
//!
//! ## 模块结构
//!
//! - `auth`: 角色、JWT、密码与访问守卫
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误类型定义与存储错误归类
//! - `handlers`: HTTP 请求处理器
//! - `import`: 表格读取与导入对账
//! - `middleware`: 角色访问与安全头中间件
//! - `models`: 实体模型
//! - `repository`: 数据库访问层
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据库：PostgreSQL (sqlx)
//! - 表格解析：calamine
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod import;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;

// 重新导出核心类型
pub use auth::{AccessDecision, AccessGuard, AuthUser, Role, RoleSet};
pub use dto::ApiResponse;
pub use error::{AgencyError, Result};
pub use import::{ImportConfig, ImportReport, RowFailure};
pub use state::AppState;
