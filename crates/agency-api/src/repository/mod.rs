//! 数据库仓储层
//!
//! 封装所有实体的 SQL 操作。
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 部分更新使用 COALESCE，未提供的字段保持原值
//! - 通过 API 创建父子记录时使用事务；批量导入逐行写入，不使用事务

mod admin_repo;
mod campaign_repo;
mod client_repo;
mod influencer_repo;
mod traits;
mod user_repo;

pub use admin_repo::AdminRepository;
pub use campaign_repo::CampaignRepository;
pub use client_repo::ClientRepository;
pub use influencer_repo::InfluencerRepository;
pub use traits::*;
pub use user_repo::UserRepository;
