use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::models::MeasurementRecord;

/// 测量记录仓储 trait
///
/// 每次写入都以新生成的 UUID 作为键插入，相同输入不会覆盖已有记录。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// 写入一条记录，返回生成的键
    async fn put(&self, record: &MeasurementRecord) -> Result<String>;

    /// 检查存储是否可用
    async fn ping(&self) -> Result<()>;
}

fn new_record_key() -> String {
    Uuid::new_v4().simple().to_string()
}

/// SurrealDB 测量记录仓储
#[cfg(feature = "surrealdb")]
#[derive(Clone)]
pub struct SurrealMeasurementRepository {
    db: surrealdb::Surreal<surrealdb::engine::any::Any>,
    table: String,
}

#[cfg(feature = "surrealdb")]
impl SurrealMeasurementRepository {
    pub fn new(pool: &crate::storage::surrealdb::SurrealPool) -> Self {
        Self {
            db: pool.inner(),
            table: pool.config().table.clone(),
        }
    }
}

#[cfg(feature = "surrealdb")]
#[async_trait]
impl MeasurementRepository for SurrealMeasurementRepository {
    async fn put(&self, record: &MeasurementRecord) -> Result<String> {
        let key = new_record_key();
        let created: Option<MeasurementRecord> = self
            .db
            .create((self.table.clone(), key.clone()))
            .content(record.clone())
            .await?;

        created.map(|_| key.clone()).ok_or_else(|| {
            crate::error::AppError::StorageRejected(format!(
                "No record returned for {}:{}",
                self.table, key
            ))
        })
    }

    async fn ping(&self) -> Result<()> {
        self.db.health().await?;
        Ok(())
    }
}

/// 进程内测量记录仓储
#[derive(Debug, Default)]
pub struct InMemoryMeasurementRepository {
    records: RwLock<HashMap<String, MeasurementRecord>>,
}

impl InMemoryMeasurementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已写入的记录数
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// 按键读取记录
    pub async fn get(&self, key: &str) -> Option<MeasurementRecord> {
        self.records.read().await.get(key).cloned()
    }

    /// 所有记录的快照
    pub async fn records(&self) -> Vec<MeasurementRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl MeasurementRepository for InMemoryMeasurementRepository {
    async fn put(&self, record: &MeasurementRecord) -> Result<String> {
        let key = new_record_key();
        self.records.write().await.insert(key.clone(), record.clone());
        Ok(key)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
