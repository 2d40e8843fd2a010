//! DualLog - 双模式日志门面
//!
//! DualLog 为调用方提供统一的分级日志 API，每个日志器实例在创建时选择后端：
//! - 结构化后端：事件携带调用者身份与上下文属性，交给外部结构化 sink（默认是 `tracing` 管道）；
//! - 文件后端：渲染为固定列宽的单行，在进程级互斥锁下追加到文件。
//!
//! # 快速开始
//!
//! ```rust
//! use dual_log::{emit, Logger, Severity};
//!
//! struct Sessions {
//!     logger: Logger,
//! }
//!
//! impl Sessions {
//!     fn login(&self, user: &str) -> dual_log::Result<()> {
//!         // 消息为 "login: User alice logged in"
//!         emit!(self.logger, Severity::Informational, "User {0} logged in", user)
//!     }
//! }
//!
//! let sessions = Sessions { logger: Logger::for_type::<Sessions>() };
//! sessions.login("alice").unwrap();
//! ```
//!
//! # 文件日志
//!
//! ```rust
//! use dual_log::{caller, Logger};
//!
//! struct Storage;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let logger = Logger::to_file::<Storage>(dir.path().join("logs/app.log")).unwrap();
//! // 行尾为 "- Error         - Storage         - disk failure"
//! logger.error(&caller!(), "disk failure").unwrap();
//! ```

pub mod config;
pub mod core;
pub mod env_config;
pub mod error;
pub mod logger;
mod macros;
pub mod sinks;
pub mod utils;

// 重新导出主要类型
pub use config::{
    load_config_from_file, load_config_from_str, validate_config, ClockMode, DualLogConfig,
    ExceptionConfig, FileConfig, OutputFormat, TracingConfig,
};
pub use env_config::{load_config_from_env, EnvConfig};
pub use error::{DualLogError, Result};
pub use logger::{Backend, Logger, LoggerBuilder};

// 重新导出核心功能
pub use crate::core::caller::{CallerIdentity, CallerResolver};
pub use crate::core::event::{LogEvent, Properties};
pub use crate::core::exception::{ErrorFrame, ErrorInfo, ExceptionFlattener};
pub use crate::core::formatter::MessageFormatter;
pub use crate::core::severity::Severity;
pub use sinks::{ConsoleSink, FileSink, MemorySink, StructuredSink, TracingSink};

use tracing_subscriber::EnvFilter;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 为默认的 tracing 后端安装全局订阅器
///
/// 订阅器按 `[tracing]` 配置选择文本或 JSON 输出，级别过滤由 `EnvFilter` 完成。
/// 进程中已存在全局订阅器时返回 [`DualLogError::InitializationError`]。
///
/// # 示例
///
/// ```rust
/// use dual_log::{init_tracing, DualLogConfig};
///
/// let config = DualLogConfig::default();
/// init_tracing(&config).unwrap();
/// assert!(init_tracing(&config).is_err());
/// ```
pub fn init_tracing(config: &DualLogConfig) -> Result<()> {
    validate_config(config)?;

    let filter = EnvFilter::try_new(config.tracing.level.to_lowercase())
        .map_err(|e| DualLogError::InvalidLogLevel(format!("{}: {}", config.tracing.level, e)))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match config.tracing.format {
        OutputFormat::Text => builder.try_init(),
        OutputFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| DualLogError::InitializationError(e.to_string()))?;

    tracing::debug!("DualLog {} tracing subscriber installed", VERSION);
    Ok(())
}
