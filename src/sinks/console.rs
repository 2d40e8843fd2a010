//! 控制台输出 Sink 实现
//!
//! 把结构化事件渲染为人类可读的单行文本，`Error` 与 `Fatal` 写入标准错误，
//! 其余级别写入标准输出，支持彩色输出。

use crate::core::event::LogEvent;
use crate::core::severity::Severity;
use crate::error::Result;
use crate::sinks::traits::{SinkMetadata, StructuredSink};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// 控制台输出 Sink
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    /// 是否使用彩色输出
    colored: bool,
    /// 是否输出上下文属性
    include_properties: bool,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink {
    /// 创建默认的控制台 sink（彩色、带属性）
    pub fn new() -> Self {
        Self {
            colored: true,
            include_properties: true,
        }
    }

    /// 使用自定义选项创建控制台 sink
    pub fn with_options(colored: bool, include_properties: bool) -> Self {
        Self {
            colored,
            include_properties,
        }
    }

    /// 格式化事件，结尾带换行
    pub fn format_event(&self, event: &LogEvent) -> String {
        let mut output = format!(
            "[{}] {} {}: {}",
            event.timestamp_utc.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.format_level(event.level),
            event.logger_name,
            event.message
        );

        if self.include_properties && !event.properties.is_empty() {
            output.push(' ');
            output.push_str(&event.properties_display());
        }

        if let Some(exception) = &event.exception {
            output.push('\n');
            output.push_str(&exception.render());
        }

        output.push('\n');
        output
    }

    /// 格式化级别，宽度与文件格式的级别列一致
    fn format_level(&self, level: Severity) -> String {
        let padded = format!("{:<13}", level.as_str());
        if !self.colored {
            return padded;
        }

        let colored: ColoredString = match level {
            Severity::Trace => padded.white(),
            Severity::Debug => padded.cyan(),
            Severity::Informational => padded.green(),
            Severity::Warning => padded.yellow(),
            Severity::Error => padded.red(),
            Severity::Fatal => padded.red().bold(),
        };
        colored.to_string()
    }

    fn use_stderr(level: Severity) -> bool {
        level >= Severity::Error
    }
}

impl StructuredSink for ConsoleSink {
    fn emit(&self, event: LogEvent) -> Result<()> {
        let output = self.format_event(&event);
        if Self::use_stderr(event.level) {
            let mut stderr = io::stderr().lock();
            stderr.write_all(output.as_bytes())?;
            stderr.flush()?;
        } else {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "console"
    }

    fn metadata(&self) -> SinkMetadata {
        SinkMetadata::new(self.name().to_string())
            .with_description("Standard output/error console sink".to_string())
    }
}
