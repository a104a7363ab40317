//! HTTP 请求处理器模块
//!
//! 包含所有 REST API 端点的处理器实现

pub mod admins;
pub mod auth;
pub mod bookings;
pub mod campaigns;
pub mod clients;
pub mod health;
pub mod imports;
pub mod influencers;
pub mod users;
