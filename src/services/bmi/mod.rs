//! BMI 服务
//!
//! 单次调用：提取参数、计算 BMI、写入一条测量记录、返回调用响应。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::config::InputMode;
use crate::error::{AppError, Result};
use crate::models::{InvocationEvent, InvocationResponse, MeasurementRecord};
use crate::observability::AppMetrics;
use crate::services::numeric::to_number_or_zero;
use crate::services::validation::validate_measurement;
use crate::storage::repository::MeasurementRepository;

/// BMI 服务 trait
#[async_trait]
pub trait BmiService: Send + Sync {
    /// 处理一次调用
    ///
    /// 记录写入失败时整个调用失败，不返回 BMI。
    async fn handle(&self, event: &InvocationEvent) -> Result<InvocationResponse>;
}

/// BMI 服务实现
pub struct BmiServiceImpl {
    repository: Arc<dyn MeasurementRepository>,
    metrics: Arc<AppMetrics>,
    input_mode: InputMode,
}

impl BmiServiceImpl {
    /// 创建新的服务实例
    pub fn new(
        repository: Arc<dyn MeasurementRepository>,
        metrics: Arc<AppMetrics>,
        input_mode: InputMode,
    ) -> Self {
        Self {
            repository,
            metrics,
            input_mode,
        }
    }

    /// 兼容模式：查询参数只记录日志，计算只使用顶层字段
    fn extract_compat(&self, event: &InvocationEvent) -> (f64, f64) {
        for name in ["weight", "height"] {
            if let Some(value) = event.query_param(name).filter(|v| !v.is_empty()) {
                info!("Received {}: {}", name, value);
            }
        }

        (
            to_number_or_zero(event.field("weight")),
            to_number_or_zero(event.field("height")),
        )
    }

    fn extract_strict(&self, event: &InvocationEvent) -> Result<(f64, f64)> {
        let input = validate_measurement(event).map_err(|e| {
            self.metrics.record_validation_failure();
            debug!("Rejected invocation: {}", e);
            AppError::from(e)
        })?;
        Ok((input.weight, input.height))
    }
}

#[async_trait]
impl BmiService for BmiServiceImpl {
    async fn handle(&self, event: &InvocationEvent) -> Result<InvocationResponse> {
        self.metrics.record_invocation();

        let (weight, height) = match self.input_mode {
            InputMode::Compat => self.extract_compat(event),
            InputMode::Strict => self.extract_strict(event)?,
        };

        let record = MeasurementRecord::new(weight, height);

        let key = self.repository.put(&record).await.inspect_err(|_| {
            self.metrics.record_store_failure();
        })?;
        self.metrics.record_store_write();
        debug!(
            "Stored measurement {} (ht: {}, wt: {}, bmi: {})",
            key,
            record.height(),
            record.weight(),
            record.bmi()
        );

        let response = InvocationResponse::ok_json(record.bmi())?;
        info!("response: {}", serde_json::to_string(&response)?);

        Ok(response)
    }
}

/// 创建 BMI 服务
pub fn create_bmi_service(
    repository: Arc<dyn MeasurementRepository>,
    metrics: Arc<AppMetrics>,
    input_mode: InputMode,
) -> Box<dyn BmiService> {
    Box::new(BmiServiceImpl::new(repository, metrics, input_mode))
}
