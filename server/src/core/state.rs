use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::relay::Relay;
use crate::reservations::Allocator;
use crate::utils::AppError;

/// 服务器状态 - 各处理器共享的单例引用
///
/// 所有字段都是浅拷贝 (Arc/handle)，clone 成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | 嵌入式数据库句柄 |
/// | allocator | 桌台分配器 (含 per-table 锁表) |
/// | relay | 通知推送 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub allocator: Allocator,
    pub relay: Relay,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, relay: Relay) -> Self {
        let allocator = Allocator::new(db.clone());
        Self {
            config,
            db,
            allocator,
            relay,
        }
    }

    /// 打开数据库并组装状态
    pub async fn initialize(config: &Config, relay: Relay) -> Result<Self, AppError> {
        let db_service = DbService::open(&config.data_dir).await?;
        Ok(Self::new(config.clone(), db_service.db, relay))
    }
}
