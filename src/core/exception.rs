//! 异常链展开
//!
//! 把一个错误及其 `source()` 因果链展开为按外到内排列的帧序列，
//! 并渲染成多行文本供文件模式使用。遍历带有访问集合与最大深度保护，
//! 自引用或过深的链会得到 `MalformedExceptionChain` 而不是死循环。

use crate::error::{DualLogError, Result};
use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::panic::Location;

/// 默认最大因果链深度
pub const DEFAULT_MAX_CAUSE_DEPTH: usize = 64;

/// 展开后的单个错误帧
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorFrame {
    /// 错误类型名（尽力推断）
    pub type_name: String,
    /// 错误消息
    pub message: String,
    /// 位置追踪文本，没有可用追踪时为空
    pub stack_trace: String,
}

impl ErrorFrame {
    pub fn new(
        type_name: impl Into<String>,
        message: impl Into<String>,
        stack_trace: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            stack_trace: stack_trace.into(),
        }
    }

    /// `{type}: {message}` 空行 `{trace}`
    fn render(&self) -> String {
        format!(
            "{}: {}\n\n{}",
            self.type_name,
            self.message,
            self.stack_trace.trim_end()
        )
    }
}

/// 展开后的异常信息，外层在前，最内层原因在后
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawErrorInfo")]
pub struct ErrorInfo {
    frames: Vec<ErrorFrame>,
}

#[derive(Deserialize)]
struct RawErrorInfo {
    frames: Vec<ErrorFrame>,
}

impl TryFrom<RawErrorInfo> for ErrorInfo {
    type Error = DualLogError;

    fn try_from(raw: RawErrorInfo) -> Result<Self> {
        Self::from_frames(raw.frames)
    }
}

impl ErrorInfo {
    /// 由已有帧构造，至少需要一帧
    pub fn from_frames(frames: Vec<ErrorFrame>) -> Result<Self> {
        if frames.is_empty() {
            return Err(DualLogError::contract("ErrorInfo requires at least one frame"));
        }
        Ok(Self { frames })
    }

    pub fn frames(&self) -> &[ErrorFrame] {
        &self.frames
    }

    /// 最外层错误
    pub fn root(&self) -> &ErrorFrame {
        &self.frames[0]
    }

    /// 原因链深度，不含根错误
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// 渲染为多行文本，各帧之间以空行分隔
    pub fn render(&self) -> String {
        self.frames
            .iter()
            .map(ErrorFrame::render)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// 异常链展开器
#[derive(Debug, Clone, Copy)]
pub struct ExceptionFlattener {
    max_depth: usize,
}

impl Default for ExceptionFlattener {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CAUSE_DEPTH)
    }
}

impl ExceptionFlattener {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// 展开错误链
    ///
    /// 根帧的追踪文本优先使用当前捕获的 backtrace（`RUST_BACKTRACE` 开启时），
    /// 否则使用日志调用点的位置。原因帧没有独立的追踪信息，记录日志调用点的位置。
    #[track_caller]
    pub fn capture(&self, error: &(dyn StdError + 'static)) -> Result<ErrorInfo> {
        let location = Location::caller();
        self.walk(error, call_site_trace(location), location_trace(location))
    }

    /// 展开静态类型已知的错误，根帧使用 `E` 的完整类型名
    #[track_caller]
    pub fn capture_typed<E: StdError + 'static>(&self, error: &E) -> Result<ErrorInfo> {
        let mut info = self.capture(error)?;
        info.frames[0].type_name = std::any::type_name::<E>().to_string();
        Ok(info)
    }

    /// 展开 `anyhow::Error`，保留 anyhow 在构造时捕获的 backtrace
    #[track_caller]
    pub fn capture_anyhow(&self, error: &anyhow::Error) -> Result<ErrorInfo> {
        let backtrace = error.backtrace();
        let root_trace = match backtrace.status() {
            BacktraceStatus::Captured => backtrace.to_string(),
            _ => call_site_trace(Location::caller()),
        };
        let root: &(dyn StdError + 'static) = error.as_ref();
        self.walk(root, root_trace, location_trace(Location::caller()))
    }

    /// 展开并渲染为文本
    #[track_caller]
    pub fn flatten(&self, error: &(dyn StdError + 'static)) -> Result<String> {
        Ok(self.capture(error)?.render())
    }

    fn walk(
        &self,
        error: &(dyn StdError + 'static),
        root_trace: String,
        cause_trace: String,
    ) -> Result<ErrorInfo> {
        let mut frames = Vec::new();
        let mut visited: Vec<*const dyn StdError> = Vec::new();
        let mut current = Some(error);

        while let Some(err) = current {
            let identity = err as *const dyn StdError;
            // 比较胖指针：内联在外层结构开头的零大小错误与外层共享数据地址
            if visited.iter().any(|seen| std::ptr::eq(*seen, identity)) {
                return Err(DualLogError::malformed_chain(format!(
                    "cause chain revisits {} after {} frames",
                    type_label(err),
                    frames.len()
                )));
            }
            if frames.len() > self.max_depth {
                return Err(DualLogError::malformed_chain(format!(
                    "cause chain deeper than {} levels",
                    self.max_depth
                )));
            }

            let trace = if frames.is_empty() {
                root_trace.clone()
            } else {
                cause_trace.clone()
            };
            frames.push(ErrorFrame::new(type_label(err), err.to_string(), trace));
            visited.push(identity);
            current = err.source();
        }

        ErrorInfo::from_frames(frames)
    }
}

fn call_site_trace(location: &'static Location<'static>) -> String {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => backtrace.to_string(),
        _ => location_trace(location),
    }
}

fn location_trace(location: &'static Location<'static>) -> String {
    format!("   at {}", location)
}

/// 推断错误类型名
///
/// trait object 无法取得具体类型名，这里先尝试常见类型的向下转换，
/// 再退回到 `Debug` 输出开头的标识符。派生 `Debug` 的枚举得到的是变体名，
/// 需要准确类型名时使用 [`ExceptionFlattener::capture_typed`]。
pub fn type_label(err: &(dyn StdError + 'static)) -> String {
    if err.is::<std::io::Error>() {
        return "std::io::Error".to_string();
    }
    if err.is::<std::num::ParseIntError>() {
        return "std::num::ParseIntError".to_string();
    }
    if err.is::<std::num::ParseFloatError>() {
        return "std::num::ParseFloatError".to_string();
    }
    if err.is::<std::fmt::Error>() {
        return "std::fmt::Error".to_string();
    }
    if err.is::<DualLogError>() {
        return "dual_log::DualLogError".to_string();
    }

    let debug = format!("{:?}", err);
    let label: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
        .collect();
    let label = label.trim_end_matches(':');
    if label.is_empty() {
        "Error".to_string()
    } else {
        label.to_string()
    }
}
