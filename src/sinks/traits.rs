//! DualLog Sink Traits
//!
//! 定义结构化路径的外部 sink 接口。门面只负责组装 [`LogEvent`] 并同步交给 sink，
//! 事件如何传输、缓冲、落地都由 sink 自己决定。
//!
//! # 使用示例
//!
//! ```rust
//! use dual_log::sinks::traits::{SinkMetadata, StructuredSink};
//! use dual_log::core::event::LogEvent;
//! use dual_log::Result;
//!
//! #[derive(Debug)]
//! struct PrintSink;
//!
//! impl StructuredSink for PrintSink {
//!     fn emit(&self, event: LogEvent) -> Result<()> {
//!         println!("{} {}: {}", event.level, event.logger_name, event.message);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "print"
//!     }
//! }
//! ```

use crate::core::event::LogEvent;
use crate::error::Result;
use std::fmt::Debug;

/// 结构化事件 sink
///
/// 在调用线程上同步执行；返回的错误原样传播给日志调用方。
pub trait StructuredSink: Send + Sync + Debug {
    /// 接收一条结构化事件
    fn emit(&self, event: LogEvent) -> Result<()>;

    /// 获取 sink 的名称
    ///
    /// 用于诊断和调试目的
    fn name(&self) -> &'static str;

    /// 获取 sink 的元数据
    fn metadata(&self) -> SinkMetadata {
        SinkMetadata::new(self.name().to_string())
    }
}

/// Sink 元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkMetadata {
    /// Sink 名称
    pub name: String,
    /// 描述信息
    pub description: Option<String>,
}

impl SinkMetadata {
    /// 创建新的 sink 元数据
    pub fn new(name: String) -> Self {
        Self {
            name,
            description: None,
        }
    }

    /// 设置描述信息
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::severity::Severity;
    use crate::error::DualLogError;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // 测试用的 Mock Sink
    #[derive(Debug)]
    struct MockSink {
        event_count: Arc<AtomicU64>,
        should_fail: bool,
    }

    impl MockSink {
        fn new() -> Self {
            Self {
                event_count: Arc::new(AtomicU64::new(0)),
                should_fail: false,
            }
        }

        fn with_failure(mut self) -> Self {
            self.should_fail = true;
            self
        }
    }

    impl StructuredSink for MockSink {
        fn emit(&self, _event: LogEvent) -> Result<()> {
            if self.should_fail {
                return Err(DualLogError::sink("Mock failure"));
            }
            self.event_count.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    #[test]
    fn test_sink_default_methods() {
        let sink = MockSink::new();
        sink.emit(LogEvent::new(Severity::Informational, "T", "m"))
            .unwrap();

        assert_eq!(sink.event_count.load(Ordering::Relaxed), 1);
        assert_eq!(sink.metadata(), SinkMetadata::new("mock".to_string()));
    }

    #[test]
    fn test_sink_error_handling() {
        let sink = MockSink::new().with_failure();
        let result = sink.emit(LogEvent::new(Severity::Error, "T", "m"));

        match result {
            Err(DualLogError::SinkError(msg)) => assert_eq!(msg, "Mock failure"),
            other => panic!("Expected SinkError, got {:?}", other),
        }
    }

    #[test]
    fn test_sink_usable_as_trait_object() {
        let sink: Arc<dyn StructuredSink> = Arc::new(MockSink::new());
        let metadata = sink
            .metadata()
            .with_description("Mock sink for testing".to_string());
        assert_eq!(metadata.name, "mock");
        assert!(metadata.description.unwrap().contains("Mock"));
    }
}
