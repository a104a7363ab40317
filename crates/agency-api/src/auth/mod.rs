//! 认证模块
//!
//! 提供 JWT Token 生成与验证、密码处理以及基于角色的访问守卫

mod guard;
mod jwt;
mod password;
mod role;

pub use guard::{AccessDecision, AccessGuard, AuthUser};
pub use jwt::{Claims, JwtConfig, JwtManager};
pub use password::{hash_password, validate_password_strength, verify_password};
pub use role::{Role, RoleSet, UnknownRole};
