//! 内存 Sink
//!
//! 把结构化事件保存在内存中，便于测试与在进程内检查最近的事件。

use crate::core::event::LogEvent;
use crate::error::Result;
use crate::sinks::traits::StructuredSink;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// 收集事件的 sink，克隆体共享同一份存储
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 已收集事件的快照
    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    /// 最近一条事件
    pub fn last(&self) -> Option<LogEvent> {
        self.lock().last().cloned()
    }

    /// 取出并清空已收集的事件
    pub fn take(&self) -> Vec<LogEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl StructuredSink for MemorySink {
    fn emit(&self, event: LogEvent) -> Result<()> {
        self.lock().push(event);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
