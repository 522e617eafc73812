//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 必填字段缺失
    #[error("缺少必填字段: {0}")]
    MissingField(String),

    /// 参数验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    /// 存储不可用（连接、传输层故障）
    #[error("存储不可用: {0}")]
    StorageUnavailable(String),

    /// 存储拒绝写入
    #[error("存储拒绝写入: {0}")]
    StorageRejected(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl AppError {
    /// 是否为调用方输入导致的错误
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::MissingField(_) | AppError::Validation(_))
    }

    /// 是否为存储写入故障
    pub fn is_storage_fault(&self) -> bool {
        matches!(
            self,
            AppError::StorageUnavailable(_) | AppError::StorageRejected(_)
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<crate::services::validation::ValidationError> for AppError {
    fn from(e: crate::services::validation::ValidationError) -> Self {
        use crate::services::validation::ValidationError;
        match e {
            ValidationError::MissingField { field } => AppError::MissingField(field),
            other => AppError::Validation(other.to_string()),
        }
    }
}

/// 传输层错误视为存储不可用，其余数据库错误视为存储拒绝写入
#[cfg(feature = "surrealdb")]
impl From<surrealdb::Error> for AppError {
    #[allow(unreachable_patterns)]
    fn from(e: surrealdb::Error) -> Self {
        match e {
            surrealdb::Error::Api(api) => AppError::StorageUnavailable(api.to_string()),
            surrealdb::Error::Db(db) => AppError::StorageRejected(db.to_string()),
            other => AppError::StorageRejected(other.to_string()),
        }
    }
}

/// Axum response implementation for AppError
///
/// Faults that are not the caller's doing never leak details: the caller
/// sees the same generic body a function host returns for a crashed
/// invocation.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = (&self).into();
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if !self.is_client_error() {
            tracing::error!(error = %self, code = %code, "invocation failed");
            return (
                status,
                Json(serde_json::json!({ "message": "Internal server error" })),
            )
                .into_response();
        }

        let mut body = ErrorResponse::new(&code, &self.to_string());
        if let AppError::MissingField(field) = &self {
            body = body.with_details(field);
        }
        (status, Json(body)).into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,
    /// 错误消息
    pub message: String,
    /// 详细信息
    pub details: Option<String>,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// 添加详细信息
    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

/// HTTP 状态码映射
impl From<&AppError> for (u16, String) {
    fn from(err: &AppError) -> (u16, String) {
        match err {
            AppError::MissingField(_) => (400, "MISSING_FIELD".to_string()),
            AppError::Validation(_) => (400, "BAD_REQUEST".to_string()),
            AppError::StorageUnavailable(_) => (500, "STORAGE_UNAVAILABLE".to_string()),
            AppError::StorageRejected(_) => (500, "STORAGE_REJECTED".to_string()),
            _ => (500, "INTERNAL_ERROR".to_string()),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
