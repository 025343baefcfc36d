//! Mesa Server - 餐厅点单与桌台管理服务
//!
//! # 架构概述
//!
//! 本模块是 Mesa 服务的主入口，提供以下核心功能：
//!
//! - **订单生命周期** (`orders`): 开台 → 加菜 → 上菜 → 结单 → 支付，
//!   与桌台占用互斥原子联动
//! - **数据库** (`db`): 嵌入式 SQLite (WAL) 存储与各实体仓储
//! - **目录** (`api/products` 等): 商品、分类、菜单项维护
//! - **报表** (`reporting`): 已结订单的营收/销量聚合
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! mesa-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层与仓储
//! ├── orders/        # 订单生命周期引擎
//! ├── session/       # 终端会话 → 当前订单绑定
//! ├── blobstore/     # 图片对象存储（签名 URL）
//! ├── reporting/     # 营收聚合
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod blobstore;
pub mod core;
pub mod db;
pub mod orders;
pub mod reporting;
pub mod session;
pub mod utils;

// Re-export 公共类型
pub use blobstore::BlobStore;
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use session::SessionBinder;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   __  ___
  /  |/  /__  _________ _
 / /|_/ / _ \/ ___/ __ `/
/ /  / /  __(__  ) /_/ /
/_/  /_/\___/____/\__,_/
    "#
    );
}
