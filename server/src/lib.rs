//! Saffron Server - 餐厅管理平台服务端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储，仓储层 + keyset 分页
//! - **预订分配** (`reservations`): 桌台分配器，半开时间窗 + per-table 锁
//! - **实时推送** (`relay`): socket.io 通知中继，TTL 会话注册表
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! server/src/
//! ├── core/          # 配置、状态、服务器启动
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! ├── reservations/  # 桌台分配器
//! ├── relay/         # 通知中继
//! ├── money.rs       # 价格计算 (rust_decimal)
//! └── utils/         # 错误、日志、校验、时间
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod money;
pub mod relay;
pub mod reservations;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use relay::{Relay, SessionRegistry};
pub use reservations::{AllocationError, Allocator};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   _____        ______
  / ___/____ _ / __/ /_________  ____
  \__ \/ __ `// /_/ ___/ __/ _ \/ __ \
 ___/ / /_/ // __/ /  / /_/  __/ / / /
/____/\__,_//_/ /_/   \__/\___/_/ /_/
"#
    );
}

/// 设置运行环境：dotenv + 日志
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
