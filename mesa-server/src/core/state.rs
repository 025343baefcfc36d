use std::sync::Arc;

use sqlx::SqlitePool;

use crate::blobstore::BlobStore;
use crate::core::Config;
use crate::db::DbService;
use crate::session::SessionBinder;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是服务的核心数据结构，持有所有共享组件。
/// 使用 Arc/池句柄实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | 嵌入式数据库连接池 |
/// | blobs | Arc<BlobStore> | 图片对象存储 (启动时构造注入) |
/// | sessions | Arc<SessionBinder> | 终端会话 → 当前订单绑定 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库连接池 (SQLite WAL)
    pub pool: SqlitePool,
    /// 图片对象存储
    pub blobs: Arc<BlobStore>,
    /// 会话绑定器
    pub sessions: Arc<SessionBinder>,
}

impl ServerState {
    /// 手动构造 (通常使用 [`ServerState::initialize`])
    pub fn new(config: Config, pool: SqlitePool, blobs: Arc<BlobStore>) -> Self {
        Self {
            config,
            pool,
            blobs,
            sessions: Arc::new(SessionBinder::new()),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/mesa.db, 自动迁移)
    /// 3. 图片对象存储 (work_dir/blobs)
    ///
    /// # Panics
    ///
    /// 数据库或对象存储初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir).expect("Failed to create database directory");

        let db_path = db_dir.join("mesa.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let blobs = BlobStore::new(config.blobs_dir(), config.blob_secret.clone())
            .expect("Failed to initialize blob store");

        Self::new(config.clone(), db_service.pool, Arc::new(blobs))
    }

    /// 测试用：内存数据库 + 临时对象存储
    pub fn with_pool(config: Config, pool: SqlitePool, blobs: Arc<BlobStore>) -> Self {
        Self::new(config, pool, blobs)
    }
}
