//! 可观测性模块
//!
//! 提供 Prometheus 文本格式指标、结构化日志和健康检查。

use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

use crate::config::config::LoggingConfig;
use crate::error::{AppError, Result};
use crate::storage::factory::StorageFactory;
use crate::storage::repository::MeasurementRepository;

// ===== Simple Metrics =====

/// 简单应用指标
#[derive(Debug, Default)]
pub struct AppMetrics {
    pub http_requests_total: AtomicU64,
    pub http_request_duration_sum: AtomicU64,
    pub invocations_total: AtomicU64,
    pub store_writes_total: AtomicU64,
    pub store_failures_total: AtomicU64,
    pub validation_failures_total: AtomicU64,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::SeqCst);
        self.http_request_duration_sum
            .fetch_add(duration_ms, Ordering::SeqCst);
    }

    pub fn record_invocation(&self) {
        self.invocations_total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_store_write(&self) {
        self.store_writes_total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_store_failure(&self) {
        self.store_failures_total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_validation_failure(&self) {
        self.validation_failures_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds summary
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP bmi_invocations_total Total BMI invocations
# TYPE bmi_invocations_total counter
bmi_invocations_total {}
# HELP bmi_store_writes_total Measurement records written
# TYPE bmi_store_writes_total counter
bmi_store_writes_total {}
# HELP bmi_store_failures_total Failed measurement record writes
# TYPE bmi_store_failures_total counter
bmi_store_failures_total {}
# HELP bmi_validation_failures_total Invocations rejected by input validation
# TYPE bmi_validation_failures_total counter
bmi_validation_failures_total {}
"#,
            self.http_requests_total.load(Ordering::SeqCst),
            self.http_request_duration_sum.load(Ordering::SeqCst) as f64 / 1000.0,
            self.http_requests_total.load(Ordering::SeqCst),
            self.invocations_total.load(Ordering::SeqCst),
            self.store_writes_total.load(Ordering::SeqCst),
            self.store_failures_total.load(Ordering::SeqCst),
            self.validation_failures_total.load(Ordering::SeqCst),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheck>,
}

/// 单个健康检查项
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
}

/// 可观测性状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub repository: Arc<dyn MeasurementRepository>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(
        version: String,
        metrics: Arc<AppMetrics>,
        repository: Arc<dyn MeasurementRepository>,
    ) -> Self {
        Self {
            metrics,
            repository,
            start_time: Utc::now(),
            version,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }

    /// 检查存储连接
    async fn check_store(&self) -> HealthCheck {
        let start = Instant::now();
        let (healthy, message) = match StorageFactory::health_check(self.repository.as_ref()).await
        {
            Ok(true) => (true, "reachable".to_string()),
            Ok(false) => (false, "unreachable".to_string()),
            Err(e) => (false, e.to_string()),
        };

        HealthCheck {
            name: "measurement_store".to_string(),
            status: health_label(healthy).to_string(),
            message: Some(message),
            latency_ms: Some(start.elapsed().as_millis() as u64),
        }
    }
}

fn health_label(healthy: bool) -> &'static str {
    if healthy { "healthy" } else { "unhealthy" }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = vec![state.check_store().await];
    let all_healthy = checks.iter().all(|c| c.status == "healthy");

    let health_status = HealthStatus {
        status: health_label(all_healthy).to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks,
    };

    let status_code = if all_healthy {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查（检查存储）
pub async fn readiness(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    if state.check_store().await.status == "healthy" {
        (axum::http::StatusCode::OK, "Ready")
    } else {
        (axum::http::StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
    }
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (axum::http::StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 需要保持到进程退出。
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let level = if config.level.is_empty() {
        "info"
    } else {
        config.level.as_str()
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, format!("{}.log", service_name));
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(writer);

    let result = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| AppError::Internal(format!("Failed to set tracing subscriber: {}", e)))?;

    Ok(guard)
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    State(metrics): State<Arc<AppMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let response = next.run(req).await;
    metrics.record_http_request(start.elapsed().as_millis() as u64);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repository::{InMemoryMeasurementRepository, MockMeasurementRepository};
    use axum::{body::Body, http::StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_metrics_gather() {
        let metrics = AppMetrics::default();
        metrics.record_http_request(100);
        metrics.record_invocation();
        metrics.record_store_write();
        metrics.record_validation_failure();

        let output = metrics.gather();
        assert!(output.contains("http_requests_total 1"));
        assert!(output.contains("bmi_invocations_total 1"));
        assert!(output.contains("bmi_store_writes_total 1"));
        assert!(output.contains("bmi_store_failures_total 0"));
        assert!(output.contains("bmi_validation_failures_total 1"));
    }

    #[tokio::test]
    async fn test_ready_with_reachable_store() {
        let state = Arc::new(ObservabilityState::new(
            "0.1.0".into(),
            Arc::new(AppMetrics::default()),
            Arc::new(InMemoryMeasurementRepository::new()),
        ));

        let response = create_observability_router(state)
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_with_unreachable_store() {
        let mut repo = MockMeasurementRepository::new();
        repo.expect_ping()
            .returning(|| Err(AppError::StorageUnavailable("connection refused".into())));
        let state = Arc::new(ObservabilityState::new(
            "0.1.0".into(),
            Arc::new(AppMetrics::default()),
            Arc::new(repo),
        ));

        let response = create_observability_router(state)
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
