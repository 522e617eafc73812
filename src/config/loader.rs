use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "BMI_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（后者覆盖前者）：
    /// 1. 内置默认值（`BMI_ENVIRONMENT=production` 时使用生产环境默认值）
    /// 2. ./config.toml
    /// 3. `BMI_` 前缀环境变量，`__` 分隔层级，例如 `BMI_SERVER__PORT`
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: PathBuf) -> Figment {
        let environment = std::env::var(format!("{}ENVIRONMENT", ENV_PREFIX)).unwrap_or_default();
        Figment::from(Serialized::defaults(AppConfig::for_environment(&environment)))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.database.url.is_empty() {
            return Err(ConfigValidationError::MissingDatabaseUrl);
        }

        if config.database.table.is_empty() {
            return Err(ConfigValidationError::MissingTable);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("数据库连接 URL 未配置")]
    MissingDatabaseUrl,

    #[error("测量记录表名未配置")]
    MissingTable,
}

impl From<ConfigValidationError> for crate::error::AppError {
    fn from(e: ConfigValidationError) -> Self {
        crate::error::AppError::Config(e.to_string())
    }
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}
