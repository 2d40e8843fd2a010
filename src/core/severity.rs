//! 日志严重级别
//!
//! 六个级别按严重程度递增排列，文件格式中打印的是枚举标签本身。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 日志事件的严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Trace,
    Debug,
    Informational,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// 所有级别，按严重程度递增
    pub const ALL: [Severity; 6] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Informational,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// 枚举标签文本
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "Trace",
            Severity::Debug => "Debug",
            Severity::Informational => "Informational",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }

    /// 映射到 tracing 级别，`Fatal` 没有对应级别，归入 `ERROR`
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Severity::Trace => tracing::Level::TRACE,
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Informational => tracing::Level::INFO,
            Severity::Warning => tracing::Level::WARN,
            Severity::Error | Severity::Fatal => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 使用 pad 以便 `{:<13}` 之类的宽度参数生效
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(Severity::Trace),
            "DEBUG" => Ok(Severity::Debug),
            "INFO" | "INFORMATIONAL" => Ok(Severity::Informational),
            "WARN" | "WARNING" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "FATAL" => Ok(Severity::Fatal),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::Fatal));
    }

    #[test]
    fn test_display_uses_tag_text() {
        assert_eq!(Severity::Informational.to_string(), "Informational");
        assert_eq!(format!("{:<13}|", Severity::Error), "Error        |");
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("info".parse::<Severity>(), Ok(Severity::Informational));
        assert_eq!("Warning".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!(" FATAL ".parse::<Severity>(), Ok(Severity::Fatal));
        assert!("verbose".parse::<Severity>().is_err());
    }

    #[test]
    fn test_tracing_level_mapping() {
        assert_eq!(Severity::Fatal.to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(
            Severity::Informational.to_tracing_level(),
            tracing::Level::INFO
        );
    }
}
