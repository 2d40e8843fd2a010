//! DualLog 事件定义
//!
//! 此模块定义了结构化路径交给外部 sink 的事件记录。

use crate::core::exception::ErrorInfo;
use crate::core::severity::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 调用方提供的上下文属性，键唯一
pub type Properties = BTreeMap<String, serde_json::Value>;

/// 结构化日志事件
///
/// 包含级别、日志器名称、已格式化的消息、UTC 时间戳、可选的异常信息与上下文属性。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    /// 日志级别
    pub level: Severity,
    /// 日志器名称
    pub logger_name: String,
    /// 已格式化的消息
    pub message: String,
    /// 事件时间戳
    pub timestamp_utc: DateTime<Utc>,
    /// 异常信息，作为独立字段而不是嵌入消息文本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<ErrorInfo>,
    /// 上下文属性
    #[serde(default)]
    pub properties: Properties,
}

impl LogEvent {
    /// 创建新的事件，时间戳取当前时间
    pub fn new(level: Severity, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            logger_name: logger_name.into(),
            message: message.into(),
            timestamp_utc: Utc::now(),
            exception: None,
            properties: Properties::new(),
        }
    }

    /// 设置异常信息
    pub fn with_exception(mut self, exception: ErrorInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    /// 复制调用方提供的属性
    pub fn with_properties(mut self, properties: &Properties) -> Self {
        self.properties
            .extend(properties.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// 获取事件的 JSON 表示
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// 属性的紧凑 `key=value` 表示，按键排序
    pub fn properties_display(&self) -> String {
        self.properties
            .iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => format!("{}={}", k, s),
                other => format!("{}={}", k, other),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
