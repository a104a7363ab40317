//! 中间件模块
//!
//! 提供角色访问控制与 HTTP 安全头中间件

mod role_gate;
mod security;

pub use role_gate::require_roles;
pub use security::security_headers;
