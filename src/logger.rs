//! 日志器与分发逻辑
//!
//! [`Logger`] 在创建时绑定名称与后端，之后不可变。每次日志调用按后端走两条路径之一：
//! - 结构化后端：组装 [`LogEvent`]（消息带调用方法名前缀，异常作为独立字段）交给 sink；
//! - 文件后端：渲染固定列宽的单行，经 [`FileSink`] 在全局锁下追加。
//!
//! 所有错误都同步返回给调用方。

use crate::config::{validate_config, ClockMode, DualLogConfig};
use crate::core::caller::{is_blank, short_type_name, CallerIdentity};
use crate::core::event::{LogEvent, Properties};
use crate::core::exception::{ErrorInfo, ExceptionFlattener};
use crate::core::formatter::MessageFormatter;
use crate::core::severity::Severity;
use crate::error::{DualLogError, Result};
use crate::sinks::file::FileSink;
use crate::sinks::tracing_sink::TracingSink;
use crate::sinks::traits::StructuredSink;
use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 异常重载在结构化后端使用的消息
pub const EXCEPTION_MESSAGE: &str = "Exception occurred.";

/// 日志器后端，创建后不再改变
#[derive(Debug, Clone)]
pub enum Backend {
    /// 委托给外部结构化 sink
    Structured(Arc<dyn StructuredSink>),
    /// 追加到单一文件
    File(FileSink),
}

impl Backend {
    fn structured(logger: &str, sink: Arc<dyn StructuredSink>) -> Self {
        let metadata = sink.metadata();
        tracing::debug!(
            logger = logger,
            sink = %metadata.name,
            description = metadata.description.as_deref().unwrap_or(""),
            "Structured logger acquired"
        );
        Backend::Structured(sink)
    }

    /// 后端名称
    pub fn kind(&self) -> &'static str {
        match self {
            Backend::Structured(_) => "structured",
            Backend::File(_) => "file",
        }
    }
}

/// 一次调用的内容
enum Payload<'a> {
    Message { template: &'a str, args: &'a [String] },
    Exception(ErrorInfo),
}

macro_rules! severity_methods {
    (
        $severity:expr, $label:literal,
        $plain:ident, $fmt:ident, $error:ident,
        $with:ident, $fmt_with:ident, $error_with:ident
    ) => {
        #[doc = concat!("以 `", $label, "` 级别记录消息")]
        pub fn $plain(&self, caller: &CallerIdentity, message: &str) -> Result<()> {
            self.log($severity, caller, message)
        }

        #[doc = concat!("以 `", $label, "` 级别记录带位置参数的模板消息")]
        pub fn $fmt(&self, caller: &CallerIdentity, template: &str, args: &[String]) -> Result<()> {
            self.log_fmt($severity, caller, template, args)
        }

        #[doc = concat!("以 `", $label, "` 级别记录错误及其原因链")]
        #[track_caller]
        pub fn $error(&self, caller: &CallerIdentity, error: &(dyn StdError + 'static)) -> Result<()> {
            self.log_error($severity, caller, error)
        }

        pub fn $with(
            &self,
            caller: &CallerIdentity,
            properties: &Properties,
            message: &str,
        ) -> Result<()> {
            self.log_with($severity, caller, properties, message)
        }

        pub fn $fmt_with(
            &self,
            caller: &CallerIdentity,
            properties: &Properties,
            template: &str,
            args: &[String],
        ) -> Result<()> {
            self.log_fmt_with($severity, caller, properties, template, args)
        }

        #[track_caller]
        pub fn $error_with(
            &self,
            caller: &CallerIdentity,
            properties: &Properties,
            error: &(dyn StdError + 'static),
        ) -> Result<()> {
            self.log_error_with($severity, caller, properties, error)
        }
    };
}

/// 日志器句柄
///
/// 克隆代价低，可在线程间共享。
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    backend: Backend,
    clock: ClockMode,
    flattener: ExceptionFlattener,
}

impl Logger {
    /// 以类型名为名称、默认 tracing 后端获取日志器
    pub fn for_type<T: ?Sized>() -> Self {
        Self::named(short_type_name(std::any::type_name::<T>()))
    }

    /// 以显式名称、默认 tracing 后端获取日志器
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_sink(name, Arc::new(TracingSink::new()))
    }

    /// 以显式名称与自定义结构化 sink 获取日志器
    pub fn with_sink(name: impl Into<String>, sink: Arc<dyn StructuredSink>) -> Self {
        let name = name.into();
        let backend = Backend::structured(&name, sink);
        Self {
            name,
            backend,
            clock: ClockMode::default(),
            flattener: ExceptionFlattener::default(),
        }
    }

    /// 以类型名为名称获取文件日志器，目录在获取时创建
    pub fn to_file<T: ?Sized>(path: impl AsRef<Path>) -> Result<Self> {
        Self::named_file(short_type_name(std::any::type_name::<T>()), path)
    }

    /// 以显式名称获取文件日志器，目录在获取时创建
    pub fn named_file(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        LoggerBuilder::new(name).file(path.as_ref()).build()
    }

    /// 创建构建器
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    /// 日志器名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 日志器后端
    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// 文件后端的目标路径
    pub fn file_path(&self) -> Option<&Path> {
        match &self.backend {
            Backend::File(sink) => Some(sink.path()),
            Backend::Structured(_) => None,
        }
    }

    severity_methods!(
        Severity::Trace, "Trace",
        trace, trace_fmt, trace_error, trace_with, trace_fmt_with, trace_error_with
    );
    severity_methods!(
        Severity::Debug, "Debug",
        debug, debug_fmt, debug_error, debug_with, debug_fmt_with, debug_error_with
    );
    severity_methods!(
        Severity::Informational, "Informational",
        info, info_fmt, info_error, info_with, info_fmt_with, info_error_with
    );
    severity_methods!(
        Severity::Warning, "Warning",
        warn, warn_fmt, warn_error, warn_with, warn_fmt_with, warn_error_with
    );
    severity_methods!(
        Severity::Error, "Error",
        error, error_fmt, error_error, error_with, error_fmt_with, error_error_with
    );
    severity_methods!(
        Severity::Fatal, "Fatal",
        fatal, fatal_fmt, fatal_error, fatal_with, fatal_fmt_with, fatal_error_with
    );

    /// 记录消息
    pub fn log(&self, severity: Severity, caller: &CallerIdentity, message: &str) -> Result<()> {
        self.dispatch(
            severity,
            caller,
            Payload::Message {
                template: message,
                args: &[],
            },
            None,
        )
    }

    /// 记录模板消息，`args` 为空时模板原样使用
    pub fn log_fmt(
        &self,
        severity: Severity,
        caller: &CallerIdentity,
        template: &str,
        args: &[String],
    ) -> Result<()> {
        self.dispatch(severity, caller, Payload::Message { template, args }, None)
    }

    /// 记录错误及其原因链
    #[track_caller]
    pub fn log_error(
        &self,
        severity: Severity,
        caller: &CallerIdentity,
        error: &(dyn StdError + 'static),
    ) -> Result<()> {
        let info = self.flattener.capture(error)?;
        self.dispatch(severity, caller, Payload::Exception(info), None)
    }

    /// 记录静态类型已知的错误，根帧带完整类型名
    #[track_caller]
    pub fn log_typed<E: StdError + 'static>(
        &self,
        severity: Severity,
        caller: &CallerIdentity,
        error: &E,
    ) -> Result<()> {
        let info = self.flattener.capture_typed(error)?;
        self.dispatch(severity, caller, Payload::Exception(info), None)
    }

    /// 记录带上下文属性的消息
    pub fn log_with(
        &self,
        severity: Severity,
        caller: &CallerIdentity,
        properties: &Properties,
        message: &str,
    ) -> Result<()> {
        self.dispatch(
            severity,
            caller,
            Payload::Message {
                template: message,
                args: &[],
            },
            Some(properties),
        )
    }

    /// 记录带上下文属性的模板消息
    pub fn log_fmt_with(
        &self,
        severity: Severity,
        caller: &CallerIdentity,
        properties: &Properties,
        template: &str,
        args: &[String],
    ) -> Result<()> {
        self.dispatch(
            severity,
            caller,
            Payload::Message { template, args },
            Some(properties),
        )
    }

    /// 记录带上下文属性的错误
    #[track_caller]
    pub fn log_error_with(
        &self,
        severity: Severity,
        caller: &CallerIdentity,
        properties: &Properties,
        error: &(dyn StdError + 'static),
    ) -> Result<()> {
        validate_properties(properties)?;
        let info = self.flattener.capture(error)?;
        self.dispatch(severity, caller, Payload::Exception(info), Some(properties))
    }

    /// 记录 `anyhow::Error`，保留其 backtrace
    #[track_caller]
    pub fn log_anyhow(
        &self,
        severity: Severity,
        caller: &CallerIdentity,
        error: &anyhow::Error,
    ) -> Result<()> {
        let info = self.flattener.capture_anyhow(error)?;
        self.dispatch(severity, caller, Payload::Exception(info), None)
    }

    fn dispatch(
        &self,
        severity: Severity,
        caller: &CallerIdentity,
        payload: Payload<'_>,
        properties: Option<&Properties>,
    ) -> Result<()> {
        // 前置条件先于任何格式化与 I/O
        if let Payload::Message { template, .. } = &payload {
            if is_blank(template) {
                return Err(DualLogError::contract("message must not be blank"));
            }
        }
        if let Some(properties) = properties {
            validate_properties(properties)?;
        }

        match &self.backend {
            Backend::Structured(sink) => {
                let event = match payload {
                    Payload::Message { template, args } => LogEvent::new(
                        severity,
                        self.name.as_str(),
                        MessageFormatter::prefixed(caller, template, args)?,
                    ),
                    Payload::Exception(info) => LogEvent::new(
                        severity,
                        self.name.as_str(),
                        MessageFormatter::prefixed(caller, EXCEPTION_MESSAGE, &[])?,
                    )
                    .with_exception(info),
                };
                let event = match properties {
                    Some(properties) => event.with_properties(properties),
                    None => event,
                };
                sink.emit(event)
            }
            Backend::File(sink) => {
                let body = match payload {
                    Payload::Message { template, args } => MessageFormatter::render(template, args)?,
                    Payload::Exception(info) => info.render(),
                };
                let line = MessageFormatter::file_line(self.clock.now(), severity, &self.name, &body);
                sink.write_line(&line)
            }
        }
    }
}

fn validate_properties(properties: &Properties) -> Result<()> {
    if properties.keys().any(|key| is_blank(key)) {
        return Err(DualLogError::contract("property keys must not be blank"));
    }
    Ok(())
}

enum Target {
    Default,
    Sink(Arc<dyn StructuredSink>),
    File(PathBuf),
}

/// 日志器构建器
///
/// ```rust
/// use dual_log::{DualLogConfig, Logger};
///
/// let logger = Logger::builder("Orders")
///     .config(DualLogConfig::default())
///     .build()
///     .unwrap();
/// assert_eq!(logger.name(), "Orders");
/// ```
pub struct LoggerBuilder {
    name: String,
    target: Target,
    config: DualLogConfig,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: Target::Default,
            config: DualLogConfig::default(),
        }
    }

    /// 以类型名为名称
    pub fn for_type<T: ?Sized>() -> Self {
        Self::new(short_type_name(std::any::type_name::<T>()))
    }

    /// 使用自定义结构化 sink
    pub fn sink(mut self, sink: Arc<dyn StructuredSink>) -> Self {
        self.target = Target::Sink(sink);
        self
    }

    /// 使用文件后端
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Target::File(path.into());
        self
    }

    /// 设置配置
    pub fn config(mut self, config: DualLogConfig) -> Self {
        self.config = config;
        self
    }

    /// 构建日志器；文件后端会在此时创建目录
    pub fn build(self) -> Result<Logger> {
        if is_blank(&self.name) {
            return Err(DualLogError::contract("logger name must not be blank"));
        }
        validate_config(&self.config)?;

        let backend = match self.target {
            Target::Default => Backend::structured(&self.name, Arc::new(TracingSink::new())),
            Target::Sink(sink) => Backend::structured(&self.name, sink),
            Target::File(path) => {
                let sink = FileSink::with_config(path, &self.config.file);
                sink.prepare()?;
                tracing::debug!("File logger {} writes to {}", self.name, sink.path().display());
                Backend::File(sink)
            }
        };

        Ok(Logger {
            name: self.name,
            backend,
            clock: self.config.file.clock,
            flattener: ExceptionFlattener::new(self.config.exception.max_cause_depth),
        })
    }
}
