use std::sync::Arc;

use serde::Serialize;
use shared::message::{ChangeAction, SyncPayload};

use crate::assist::{self, DisabledKeywordGenerator, KeywordGenerator};
use crate::catalog::{CatalogStore, SqliteCatalogStore};
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::message::{ChangeBus, ResourceVersions};
use crate::tenant::TenantRegistry;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求 clone 一次。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | DbService | SQLite 连接池 |
/// | store | Arc<dyn CatalogStore> | 菜单目录存储 |
/// | tenants | Arc<TenantRegistry> | 租户注册表 |
/// | keywords | Arc<dyn KeywordGenerator> | 关键词生成 |
/// | bus | ChangeBus | 变更通知 |
/// | resource_versions | Arc<ResourceVersions> | 资源版本管理 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub store: Arc<dyn CatalogStore>,
    pub tenants: Arc<TenantRegistry>,
    pub keywords: Arc<dyn KeywordGenerator>,
    pub bus: ChangeBus,
    pub resource_versions: Arc<ResourceVersions>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("tenants", &self.tenants.len())
            .field("subscribers", &self.bus.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`](Self::initialize) 代替
    pub fn new(
        config: Config,
        db: DbService,
        tenants: TenantRegistry,
        keywords: Arc<dyn KeywordGenerator>,
    ) -> Self {
        let store: Arc<dyn CatalogStore> = Arc::new(SqliteCatalogStore::new(&db));
        Self {
            config,
            db,
            store,
            tenants: Arc::new(tenants),
            keywords,
            bus: ChangeBus::default(),
            resource_versions: Arc::new(ResourceVersions::new()),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/menu.db)
    /// 3. 租户注册表 (TENANTS_FILE 或内置)
    /// 4. 关键词生成客户端
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_file();
        let db = DbService::new(&db_path.to_string_lossy()).await?;

        let tenants = match &config.tenants_file {
            Some(path) => TenantRegistry::from_file(path)?,
            None => TenantRegistry::builtin(),
        };
        if tenants.is_empty() {
            return Err(ServerError::Config("tenant registry is empty".into()));
        }
        tracing::info!(count = tenants.len(), "Tenant registry loaded");

        let keywords = assist::from_config(config)?;
        Ok(Self::new(config.clone(), db, tenants, keywords))
    }

    /// In-memory database, built-in tenants, keyword assist disabled
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory().await?;
        Ok(Self::new(
            config,
            db,
            TenantRegistry::builtin(),
            Arc::new(DisabledKeywordGenerator),
        ))
    }

    /// Replace the keyword generator (tests and alternative backends)
    pub fn with_keyword_generator(mut self, keywords: Arc<dyn KeywordGenerator>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Replace the catalog store
    pub fn with_store(mut self, store: Arc<dyn CatalogStore>) -> Self {
        self.store = store;
        self
    }

    /// 广播同步消息
    ///
    /// 版本号由 ResourceVersions 按 `tenant:resource` 自动递增。
    ///
    /// # 参数
    /// - `tenant`: 租户命名空间
    /// - `resource`: 资源类型 ("category", "menu_item", "settings")
    /// - `action`: 变更类型
    /// - `id`: 资源 ID (批量操作为空)
    /// - `data`: 资源数据 (deleted 时为 None)
    pub fn broadcast_sync<T: Serialize>(
        &self,
        tenant: &str,
        resource: &str,
        action: ChangeAction,
        id: &str,
        data: Option<&T>,
    ) -> u64 {
        let version = self.resource_versions.increment(tenant, resource);
        let payload = SyncPayload {
            tenant: tenant.to_string(),
            resource: resource.to_string(),
            version,
            action,
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
        };
        self.bus.publish(payload);
        version
    }
}
