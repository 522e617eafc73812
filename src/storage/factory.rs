//! 存储工厂模块
//!
//! 根据配置创建相应的测量记录仓储。

use crate::config::config::DatabaseConfig;
use crate::error::{AppError, Result};
use crate::storage::repository::{InMemoryMeasurementRepository, MeasurementRepository};
use std::sync::Arc;
use tracing::info;

#[cfg(feature = "surrealdb")]
use crate::storage::{repository::SurrealMeasurementRepository, surrealdb::SurrealPool};

/// 进程内存储的连接地址
pub const MEMORY_URL: &str = "memory";

/// 存储工厂
pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置创建仓储实例
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn MeasurementRepository>> {
        if config.url == MEMORY_URL {
            info!("Using in-memory measurement store");
            return Ok(Arc::new(InMemoryMeasurementRepository::new()));
        }

        Self::create_surrealdb(config).await
    }

    #[cfg(feature = "surrealdb")]
    async fn create_surrealdb(config: &DatabaseConfig) -> Result<Arc<dyn MeasurementRepository>> {
        let pool = SurrealPool::new(config.clone()).await?;
        info!(
            "Using SurrealDB measurement store at {} (table: {})",
            config.url, config.table
        );
        Ok(Arc::new(SurrealMeasurementRepository::new(&pool)))
    }

    #[cfg(not(feature = "surrealdb"))]
    async fn create_surrealdb(config: &DatabaseConfig) -> Result<Arc<dyn MeasurementRepository>> {
        Err(AppError::Config(format!(
            "Cannot open '{}': the 'surrealdb' feature is not enabled. Use url = \"{}\" instead.",
            config.url, MEMORY_URL
        )))
    }

    /// 检查存储是否可用
    pub async fn health_check(repository: &dyn MeasurementRepository) -> Result<bool> {
        match repository.ping().await {
            Ok(()) => Ok(true),
            Err(e) if e.is_storage_fault() => Ok(false),
            Err(e) => Err(AppError::Internal(e.to_string())),
        }
    }
}
