//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;
use std::time::Instant;

use agency_shared::database::Database;
use sqlx::PgPool;

use crate::auth::{AccessGuard, JwtConfig, JwtManager};
use crate::import::ImportConfig;
use crate::repository::{
    AdminRepository, CampaignRepository, ClientRepository, InfluencerRepository, UserRepository,
};

/// Axum 应用共享状态
///
/// 除连接池外全部只读，通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt_manager: JwtManager,
    pub guard: AccessGuard,
    pub import: Arc<ImportConfig>,
    pub started_at: Instant,
    pub admins: Arc<AdminRepository>,
    pub clients: Arc<ClientRepository>,
    pub campaigns: Arc<CampaignRepository>,
    pub influencers: Arc<InfluencerRepository>,
    pub users: Arc<UserRepository>,
}

impl AppState {
    pub fn new(db: Database, jwt_config: JwtConfig, import: ImportConfig) -> Self {
        let pool = db.pool().clone();
        let jwt_manager = JwtManager::new(jwt_config);

        Self {
            guard: AccessGuard::new(jwt_manager.clone()),
            jwt_manager,
            import: Arc::new(import),
            started_at: Instant::now(),
            admins: Arc::new(AdminRepository::new(pool.clone())),
            clients: Arc::new(ClientRepository::new(pool.clone())),
            campaigns: Arc::new(CampaignRepository::new(pool.clone())),
            influencers: Arc::new(InfluencerRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool)),
            db,
        }
    }

    pub fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}
