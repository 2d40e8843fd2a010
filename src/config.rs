//! 定义 DualLog 日志门面的所有配置结构体。

use crate::core::exception::DEFAULT_MAX_CAUSE_DEPTH;
use serde::Deserialize;

// --- 辅助函数，用于提供配置项的默认值 ---
fn default_true() -> bool {
    true
}
fn default_line_ending() -> String {
    "\n".to_string()
}
fn default_max_cause_depth() -> usize {
    DEFAULT_MAX_CAUSE_DEPTH
}
fn default_tracing_level() -> String {
    "INFO".to_string()
}

/// 文件行时间戳使用的时钟
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockMode {
    /// 本地时间
    #[default]
    Local,
    /// UTC 时间
    Utc,
}

impl ClockMode {
    /// 当前时间（不带时区）
    pub fn now(&self) -> chrono::NaiveDateTime {
        match self {
            ClockMode::Local => chrono::Local::now().naive_local(),
            ClockMode::Utc => chrono::Utc::now().naive_utc(),
        }
    }
}

/// 诊断输出格式
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// DualLog 的顶层配置结构体。
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct DualLogConfig {
    #[serde(default)]
    pub file: FileConfig,
    #[serde(default)]
    pub exception: ExceptionConfig,
    #[serde(default)]
    pub tracing: TracingConfig,
}

/// 文件后端配置
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// 时间戳时钟
    #[serde(default)]
    pub clock: ClockMode,
    /// 每条记录后追加的行尾
    #[serde(default = "default_line_ending")]
    pub line_ending: String,
    /// 获取日志器以及写入时是否自动创建父目录
    #[serde(default = "default_true")]
    pub create_directories: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            clock: ClockMode::default(),
            line_ending: default_line_ending(),
            create_directories: default_true(),
        }
    }
}

/// 异常展开配置
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExceptionConfig {
    #[serde(default = "default_max_cause_depth")]
    pub max_cause_depth: usize,
}

impl Default for ExceptionConfig {
    fn default() -> Self {
        Self {
            max_cause_depth: default_max_cause_depth(),
        }
    }
}

/// 默认结构化后端（tracing 管道）的订阅器配置
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TracingConfig {
    #[serde(default = "default_tracing_level")]
    pub level: String,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: default_tracing_level(),
            format: OutputFormat::default(),
        }
    }
}

/// 用于从 TOML 文件加载 `DualLogConfig` 的辅助函数。
pub fn load_config_from_file(path: &std::path::Path) -> crate::error::Result<DualLogConfig> {
    use crate::error::DualLogError;
    use std::fs;

    if !path.exists() {
        return Err(DualLogError::ConfigFileMissing(
            path.to_string_lossy().into_owned(),
        ));
    }

    let config_str = fs::read_to_string(path)?;
    load_config_from_str(&config_str)
}

/// 用于从 TOML 字符串加载 `DualLogConfig` 的辅助函数。
pub fn load_config_from_str(config_str: &str) -> crate::error::Result<DualLogConfig> {
    let config: DualLogConfig = toml::from_str(config_str)?;
    validate_config(&config)?;
    Ok(config)
}

/// 验证配置的有效性。
pub fn validate_config(config: &DualLogConfig) -> crate::error::Result<()> {
    use crate::error::DualLogError;

    match config.tracing.level.to_uppercase().as_str() {
        "TRACE" | "DEBUG" | "INFO" | "WARN" | "ERROR" | "OFF" => {}
        _ => {
            return Err(DualLogError::InvalidLogLevel(
                config.tracing.level.clone(),
            ))
        }
    }

    if config.exception.max_cause_depth == 0 {
        return Err(DualLogError::ConfigError(
            "max_cause_depth must be greater than 0".to_string(),
        ));
    }

    if !config
        .file
        .line_ending
        .chars()
        .all(|c| c == '\n' || c == '\r')
    {
        return Err(DualLogError::ConfigError(format!(
            "line_ending may only contain \\r and \\n: {:?}",
            config.file.line_ending
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DualLogError;

    #[test]
    fn test_default_config() {
        let config = DualLogConfig::default();
        assert_eq!(config.file.clock, ClockMode::Local);
        assert_eq!(config.file.line_ending, "\n");
        assert!(config.file.create_directories);
        assert_eq!(config.exception.max_cause_depth, 64);
        assert_eq!(config.tracing.level, "INFO");
        assert_eq!(config.tracing.format, OutputFormat::Text);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_config_from_str_basic() {
        let toml_str = r#"
            [file]
            clock = "Utc"
            line_ending = "\r\n"

            [exception]
            max_cause_depth = 8

            [tracing]
            level = "DEBUG"
            format = "Json"
        "#;

        let config = load_config_from_str(toml_str).unwrap();
        assert_eq!(config.file.clock, ClockMode::Utc);
        assert_eq!(config.file.line_ending, "\r\n");
        assert!(config.file.create_directories);
        assert_eq!(config.exception.max_cause_depth, 8);
        assert_eq!(config.tracing.level, "DEBUG");
        assert_eq!(config.tracing.format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, DualLogConfig::default());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = load_config_from_str("[file]\nrotate = true\n");
        assert!(matches!(result, Err(DualLogError::TomlError { .. })));
    }

    #[test]
    fn test_validate_config_invalid_level() {
        let mut config = DualLogConfig::default();
        config.tracing.level = "LOUD".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(DualLogError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_validate_config_zero_depth() {
        let result = load_config_from_str("[exception]\nmax_cause_depth = 0\n");
        assert!(matches!(result, Err(DualLogError::ConfigError(_))));
    }

    #[test]
    fn test_validate_config_bad_line_ending() {
        let result = load_config_from_str("[file]\nline_ending = \";\"\n");
        assert!(matches!(result, Err(DualLogError::ConfigError(_))));
    }

    #[test]
    fn test_load_config_from_missing_file() {
        let result = load_config_from_file(std::path::Path::new("/nonexistent/dual_log.toml"));
        assert!(matches!(result, Err(DualLogError::ConfigFileMissing(_))));
    }
}
