//! DualLog 核心模块
//!
//! 包含严重级别、调用者身份、事件结构、异常链展开与消息格式化。

pub mod caller;
pub mod event;
pub mod exception;
pub mod formatter;
pub mod severity;

pub use caller::{CallerIdentity, CallerResolver};
pub use event::{LogEvent, Properties};
pub use exception::{ErrorFrame, ErrorInfo, ExceptionFlattener};
pub use formatter::MessageFormatter;
pub use severity::Severity;
