//! Inventory Server - 面包店库存与商品目录后端
//!
//! # 架构概述
//!
//! - **HTTP API** (`api`): RESTful 接口 (axum)
//! - **数据库** (`db`): SQLite 存储 (sqlx)，启动时应用 schema
//! - **定价** (`pricing`): 批发阶梯价格规则归一化
//! - **服务** (`services`): 图片存储与孤儿文件清理
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! ├── pricing/       # 批发价格规则
//! ├── services/      # 图片存储
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// 设置环境: dotenv + 日志
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
