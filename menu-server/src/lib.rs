//! Menu Server - 多租户餐厅电子菜单服务
//!
//! # 架构概述
//!
//! - **租户** (`tenant`): 固定注册表，路由级解析 `{tenant}`
//! - **目录** (`catalog`): 分类/菜品存储、一级嵌套树、公共/管理视图
//! - **排序** (`reorder`): 拖拽移动、重新编号、批量持久化
//! - **关键词** (`assist`): 外部文本生成服务 (可选、非阻塞)
//! - **变更通知** (`message`): 广播 + SSE
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! menu-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── tenant/        # 租户注册表与提取器
//! ├── catalog/       # 存储接口、视图模型、管理端会话
//! ├── reorder/       # 排序引擎
//! ├── assist/        # 关键词生成
//! ├── message/       # 变更总线
//! ├── db/            # SQLite 连接池与仓储
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod assist;
pub mod catalog;
pub mod core;
pub mod db;
pub mod message;
pub mod reorder;
pub mod tenant;
pub mod utils;

// Re-export 公共类型
pub use catalog::{AdminSession, CatalogStore, SqliteCatalogStore};
pub use core::{Config, Server, ServerState};
pub use tenant::{TenantRegistry, TenantScope};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: 加载 `.env`，初始化日志
pub fn setup_environment() {
    if let Err(e) = dotenv::dotenv() {
        // .env 可选
        eprintln!("No .env loaded: {e}");
    }
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /__  ____  __  __
  / /|_/ / _ \/ __ \/ / / /
 / /  / /  __/ / / / /_/ /
/_/  /_/\___/_/ /_/\__,_/
    "#
    );
}
