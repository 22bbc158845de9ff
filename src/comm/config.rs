use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// 配置错误类型 / Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置初始化失败: {message}")]
    InitializationError { message: String },

    #[error("配置项不存在: {key}")]
    KeyNotFound { key: String },

    #[error("配置类型转换失败: {key}: {message}")]
    TypeConversionError { key: String, message: String },
}

/// 分层配置管理器 / Layered configuration manager
///
/// 配置源优先级：环境变量（RBAC_ 前缀）覆盖可选的 TOML 配置文件
/// Sources, later wins: optional TOML file, then environment variables
/// with the `RBAC` prefix (`RBAC_SERVER_PORT=7007` -> `server.port`).
pub struct ConfigManager {
    config: Config,
    sources: Vec<String>,
}

impl ConfigManager {
    /// 使用默认配置文件路径创建 / build with the default file path
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_file("config/default")
    }

    /// 使用指定配置文件路径创建 / build with an explicit file path
    pub fn with_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("RBAC").separator("_"))
            .build()
            .map_err(|e| ConfigError::InitializationError {
                message: e.to_string(),
            })?;

        Ok(Self {
            config,
            sources: vec![
                format!("file: {}.toml (optional)", path),
                "env: RBAC_* (override)".to_string(),
            ],
        })
    }

    /// 读取配置项 / typed read
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.config.get::<T>(key).map_err(|e| match e {
            config::ConfigError::NotFound(_) => ConfigError::KeyNotFound {
                key: key.to_string(),
            },
            other => ConfigError::TypeConversionError {
                key: key.to_string(),
                message: other.to_string(),
            },
        })
    }

    /// 读取配置项，缺失时返回默认值 / read with fallback
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.get::<String>(key)
    }

    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        self.get::<i64>(key)
    }

    /// 配置项是否存在
    pub fn exists(&self, key: &str) -> bool {
        self.config.get::<config::Value>(key).is_ok()
    }

    /// 打印配置源信息 / print the active source chain
    pub fn print_sources_info(&self) {
        println!("配置源 / config sources:");
        for (idx, source) in self.sources.iter().enumerate() {
            println!("  {}. {}", idx + 1, source);
        }
    }
}

/// 获取全局配置管理器单例 / global singleton accessor
pub fn get_global_config_manager() -> Result<Arc<ConfigManager>, ConfigError> {
    static INSTANCE: OnceLock<Arc<ConfigManager>> = OnceLock::new();

    if let Some(manager) = INSTANCE.get() {
        return Ok(manager.clone());
    }

    let manager = Arc::new(ConfigManager::new()?);
    Ok(INSTANCE.get_or_init(|| manager).clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_fatal() {
        let manager = ConfigManager::with_file("config/no-such-file").unwrap();
        assert_eq!(manager.get_or("server.port", 8080_i64), 8080);
    }

    #[test]
    fn test_key_not_found() {
        let manager = ConfigManager::with_file("config/no-such-file").unwrap();
        match manager.get_string("nonexistent.key") {
            Err(ConfigError::KeyNotFound { key }) => assert_eq!(key, "nonexistent.key"),
            other => panic!("expected KeyNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_global_singleton_returns_same_instance() {
        let a = get_global_config_manager().unwrap();
        let b = get_global_config_manager().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
