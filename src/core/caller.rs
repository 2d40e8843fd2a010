//! 调用者身份解析
//!
//! 调用者身份（所属类型/模块 + 方法名）不再通过运行时栈遍历获得，
//! 而是由 [`caller!`](crate::caller) 宏在调用点显式提供：宏在调用函数内部
//! 定义一个标记函数，再用 `std::any::type_name` 取得它的完整路径交给
//! [`CallerResolver::resolve`] 解析。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 无法确定所属类型时使用的占位值
pub const TYPE_UNAVAILABLE: &str = "TypeUnavailable";
/// 无法确定方法名时使用的占位值
pub const METHOD_UNAVAILABLE: &str = "N/A";
/// `caller!` 宏定义的标记函数名
pub const CALLER_MARKER: &str = "__dual_log_caller";

const CLOSURE_SEGMENT: &str = "{{closure}}";

/// 发出日志调用的代码身份
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// 所属类型或模块
    pub declaring_type: String,
    /// 方法名
    pub method_name: String,
}

impl CallerIdentity {
    /// 创建调用者身份
    pub fn new(declaring_type: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            method_name: method_name.into(),
        }
    }

    /// 占位身份 `{TypeUnavailable, N/A}`
    pub fn unavailable() -> Self {
        Self::new(TYPE_UNAVAILABLE, METHOD_UNAVAILABLE)
    }

    /// 是否为真实解析出的身份
    pub fn is_available(&self) -> bool {
        self.declaring_type != TYPE_UNAVAILABLE || self.method_name != METHOD_UNAVAILABLE
    }
}

impl Default for CallerIdentity {
    fn default() -> Self {
        Self::unavailable()
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.declaring_type, self.method_name)
    }
}

/// 调用者身份解析器
pub struct CallerResolver;

impl CallerResolver {
    /// 从函数路径解析调用者身份
    ///
    /// `function_path` 形如 `my_app::service::Handler::login::__dual_log_caller`。
    /// 标记段与 `{{closure}}` 段会被跳过，最后一段是方法名，倒数第二段是所属类型。
    /// 解析失败时返回占位身份，从不报错。
    pub fn resolve(function_path: &str) -> CallerIdentity {
        let segments: Vec<&str> = split_path(function_path)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != CLOSURE_SEGMENT && *s != CALLER_MARKER)
            .collect();

        match segments.as_slice() {
            [.., owner, method] => {
                let declaring_type = short_type_name(owner);
                if declaring_type.is_empty() || is_blank(method) {
                    CallerIdentity::unavailable()
                } else {
                    CallerIdentity::new(declaring_type, *method)
                }
            }
            _ => CallerIdentity::unavailable(),
        }
    }
}

/// 取类型路径的最后一段并去掉泛型参数
///
/// `my_app::Repo<u32>` → `Repo`，`<my_app::Repo as my_app::Store>` → `Repo`。
pub fn short_type_name(path: &str) -> String {
    let trimmed = path.trim();
    let inner = match trimmed.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        Some(body) => split_top_level(body, " as ").into_iter().next().unwrap_or(body),
        None => trimmed,
    };

    let last = split_path(inner).into_iter().last().unwrap_or(inner).trim();
    match last.find('<') {
        Some(idx) => last[..idx].to_string(),
        None => last.to_string(),
    }
}

/// 按顶层 `::` 切分路径，忽略尖括号内的分隔符
fn split_path(path: &str) -> Vec<&str> {
    split_top_level(path, "::")
}

fn split_top_level<'a>(input: &'a str, separator: &str) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    let mut idx = 0usize;
    let bytes = input.as_bytes();

    while idx < bytes.len() {
        match bytes[idx] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 && bytes[idx..].starts_with(separator.as_bytes()) {
            parts.push(&input[start..idx]);
            idx += separator.len();
            start = idx;
            continue;
        }
        idx += 1;
    }
    parts.push(&input[start..]);
    parts
}

/// 字符串为空或只包含空白字符
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
