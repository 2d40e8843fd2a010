//! DualLog Sinks 模块
//!
//! - 结构化路径：实现 [`StructuredSink`] 的外部 sink，默认是 [`TracingSink`]；
//! - 文件路径：[`FileSink`]，全局锁下追加固定列宽的行。

pub mod console;
pub mod file;
pub mod memory;
pub mod tracing_sink;
pub mod traits;

// 重新导出主要类型
pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::MemorySink;
pub use tracing_sink::TracingSink;
pub use traits::{SinkMetadata, StructuredSink};
