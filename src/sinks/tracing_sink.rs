//! tracing 管道 Sink
//!
//! 默认的结构化后端：把 [`LogEvent`] 转成 `tracing` 事件，交给进程当前安装的订阅器。

use crate::core::event::LogEvent;
use crate::core::severity::Severity;
use crate::error::Result;
use crate::sinks::traits::{SinkMetadata, StructuredSink};
use tracing::Level;

/// 转发到 tracing 时使用的 target
pub const TRACING_TARGET: &str = "dual_log";

macro_rules! forward_event {
    ($level:expr, $event:expr, $fatal:expr, $properties:expr, $exception:expr) => {
        tracing::event!(
            target: TRACING_TARGET,
            $level,
            logger = %$event.logger_name,
            fatal = $fatal,
            properties = %$properties,
            exception = $exception,
            timestamp = %$event.timestamp_utc.to_rfc3339(),
            "{}",
            $event.message
        )
    };
}

/// 把事件转发到 tracing 的 sink
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl StructuredSink for TracingSink {
    fn emit(&self, event: LogEvent) -> Result<()> {
        let properties = serde_json::to_string(&event.properties)?;
        let exception = event.exception.as_ref().map(|info| info.render());
        let exception = exception.as_deref();
        let fatal = event.level == Severity::Fatal;

        // tracing 的级别必须是常量
        match event.level {
            Severity::Trace => forward_event!(Level::TRACE, event, fatal, properties, exception),
            Severity::Debug => forward_event!(Level::DEBUG, event, fatal, properties, exception),
            Severity::Informational => {
                forward_event!(Level::INFO, event, fatal, properties, exception)
            }
            Severity::Warning => forward_event!(Level::WARN, event, fatal, properties, exception),
            Severity::Error | Severity::Fatal => {
                forward_event!(Level::ERROR, event, fatal, properties, exception)
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "tracing"
    }

    fn metadata(&self) -> SinkMetadata {
        SinkMetadata::new(self.name().to_string())
            .with_description(format!("forwards events to tracing target {}", TRACING_TARGET))
    }
}
