use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SurrealDB 连接地址（`rocksdb://`、`http://`），`memory` 表示进程内存储
    pub url: String,
    /// 命名空间
    pub namespace: String,
    /// 数据库名称
    pub database: String,
    /// 用户名（为空时跳过认证）
    pub username: String,
    /// 密码
    pub password: String,
    /// 测量记录表名
    pub table: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 输入参数处理模式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// 查询参数仅记录日志，顶层字段参与计算，缺失按 0 处理
    #[default]
    Compat,
    /// 统一提取路径，缺失或非法参数返回错误
    Strict,
}

/// 处理器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HandlerConfig {
    /// 参数处理模式
    pub input_mode: InputMode,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 处理器配置
    pub handler: HandlerConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            database: DatabaseConfig {
                url: "rocksdb://./data/bmi".into(),
                namespace: "bmi".into(),
                database: "measurements".into(),
                username: String::new(),
                password: String::new(),
                table: "BMITable".into(),
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            handler: HandlerConfig::default(),
            app_name: "bmi-function".into(),
            environment: "development".into(),
        }
    }

    /// 按环境名称选择默认配置，未知名称回落到开发环境
    pub fn for_environment(environment: &str) -> Self {
        match environment.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::production(),
            _ => Self::development(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config
    }
}
