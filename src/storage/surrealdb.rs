use crate::config::config::DatabaseConfig;
use surrealdb::{
    Surreal,
    engine::any::{Any, connect},
    opt::auth::Root,
};
use tracing::debug;

/// SurrealDB 连接
#[derive(Clone)]
pub struct SurrealPool {
    /// 数据库连接
    db: Surreal<Any>,
    /// 连接配置
    config: DatabaseConfig,
}

impl SurrealPool {
    /// 建立连接并选择命名空间和数据库
    pub async fn new(config: DatabaseConfig) -> Result<Self, surrealdb::Error> {
        let db: Surreal<Any> = connect(&config.url).await?;

        // 嵌入式引擎无需认证
        if !config.username.is_empty() {
            db.signin(Root {
                username: &config.username,
                password: &config.password,
            })
            .await?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        debug!(
            "Connected to {} (ns: {}, db: {})",
            config.url, config.namespace, config.database
        );

        Ok(Self { db, config })
    }

    /// 获取内部数据库实例
    pub fn inner(&self) -> Surreal<Any> {
        self.db.clone()
    }

    /// 连接配置
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}
