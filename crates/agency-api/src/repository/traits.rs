//! 仓储 Trait 定义
//!
//! 批量导入只依赖这里的抽象接口，测试中可替换为内存实现或 mock

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Account, Client, ClientLocation, Influencer, NewAccount, NewClient, NewInfluencer,
    NewLocation, Platform,
};

/// 客户写入接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn create_client(&self, client: &NewClient) -> Result<Client>;
    async fn create_location(&self, client_id: i64, location: &NewLocation)
    -> Result<ClientLocation>;
}

/// 达人写入接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InfluencerStore: Send + Sync {
    async fn find_platform_by_name(&self, name: &str) -> Result<Option<Platform>>;
    async fn create_influencer(&self, influencer: &NewInfluencer) -> Result<Influencer>;
    async fn create_account(&self, influencer_id: i64, account: &NewAccount) -> Result<Account>;
}
