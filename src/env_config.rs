//! 环境变量配置模块
//!
//! 此模块提供从环境变量定位配置文件与覆盖诊断级别的功能。

use crate::config::{load_config_from_file, validate_config, DualLogConfig};
use crate::error::Result;
use std::env;
use std::path::PathBuf;

/// 配置文件路径环境变量
pub const CONFIG_PATH_VAR: &str = "DUAL_LOG_CONFIG";
/// 诊断级别覆盖环境变量
pub const LEVEL_VAR: &str = "DUAL_LOG_LEVEL";

/// 环境变量配置管理器
pub struct EnvConfig;

impl EnvConfig {
    /// 从环境变量读取配置文件路径
    pub fn config_path() -> Option<PathBuf> {
        env::var(CONFIG_PATH_VAR)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    }

    /// 从环境变量读取诊断级别
    pub fn tracing_level() -> Option<String> {
        env::var(LEVEL_VAR).ok().filter(|s| !s.trim().is_empty())
    }

    /// 把环境变量覆盖应用到已有配置上
    pub fn apply_overrides(mut config: DualLogConfig) -> Result<DualLogConfig> {
        if let Some(level) = Self::tracing_level() {
            config.tracing.level = level;
        }
        validate_config(&config)?;
        Ok(config)
    }
}

/// 加载配置：`DUAL_LOG_CONFIG` 指向的文件（未设置时用默认值），再应用 `DUAL_LOG_LEVEL`
pub fn load_config_from_env() -> Result<DualLogConfig> {
    let config = match EnvConfig::config_path() {
        Some(path) => load_config_from_file(&path)?,
        None => DualLogConfig::default(),
    };
    EnvConfig::apply_overrides(config)
}
