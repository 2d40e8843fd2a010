//! 消息格式化
//!
//! 两项职责：
//! - 结构化路径：`{方法名}: {模板}`，模板中的 `{0}`、`{1}` 等位置占位符由预渲染的参数替换；
//! - 文件路径：固定列宽的单行格式，列宽是已有日志文件与下游解析器的兼容契约。

use crate::core::caller::CallerIdentity;
use crate::core::severity::Severity;
use crate::error::{DualLogError, Result};
use chrono::NaiveDateTime;

/// 文件行时间戳格式（`yyyy-MM-dd HH:mm:ss`）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// 时间戳列宽（右对齐）
pub const TIMESTAMP_WIDTH: usize = 19;
/// 级别列宽（左对齐）
pub const SEVERITY_WIDTH: usize = 13;
/// 所属名称列宽（左对齐）
pub const OWNER_WIDTH: usize = 15;
/// 占位符对齐宽度的绝对值上限，超出时视为格式错误
pub const MAX_ALIGNMENT: i64 = u16::MAX as i64;

/// 消息格式化器
pub struct MessageFormatter;

impl MessageFormatter {
    /// 结构化路径的带前缀格式化
    ///
    /// `args` 为空时不做任何替换，模板原样使用。
    pub fn prefixed(identity: &CallerIdentity, template: &str, args: &[String]) -> Result<String> {
        let body = if args.is_empty() {
            template.to_string()
        } else {
            Self::substitute(template, args)?
        };
        Ok(format!("{}: {}", identity.method_name, body))
    }

    /// 不带前缀的模板渲染，文件路径使用
    pub fn render(template: &str, args: &[String]) -> Result<String> {
        if args.is_empty() {
            Ok(template.to_string())
        } else {
            Self::substitute(template, args)
        }
    }

    /// 替换位置占位符
    ///
    /// 支持 `{index}`、`{index,alignment}`（正数右对齐，负数左对齐）以及 `{{`、`}}` 转义。
    /// 参数已是字符串，`{0:N2}` 这类格式说明符会被拒绝。
    pub fn substitute(template: &str, args: &[String]) -> Result<String> {
        let mut output = String::with_capacity(template.len() + args.iter().map(String::len).sum::<usize>());
        let mut chars = template.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' => {
                    if matches!(chars.peek(), Some((_, '{'))) {
                        chars.next();
                        output.push('{');
                        continue;
                    }

                    let mut spec = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        spec.push(inner);
                    }
                    if !closed {
                        return Err(DualLogError::format(
                            template,
                            format!("unclosed placeholder starting at byte {}", pos),
                        ));
                    }

                    let (index, alignment) = parse_placeholder(template, &spec)?;
                    let arg = args.get(index).ok_or_else(|| {
                        DualLogError::format(
                            template,
                            format!(
                                "placeholder {{{}}} has no argument ({} supplied)",
                                index,
                                args.len()
                            ),
                        )
                    })?;
                    push_aligned(&mut output, arg, alignment);
                }
                '}' => {
                    if matches!(chars.peek(), Some((_, '}'))) {
                        chars.next();
                        output.push('}');
                    } else {
                        return Err(DualLogError::format(
                            template,
                            format!("unmatched '}}' at byte {}", pos),
                        ));
                    }
                }
                _ => output.push(c),
            }
        }

        Ok(output)
    }

    /// 文件路径的固定列宽行，不带行尾
    pub fn file_line(
        timestamp: NaiveDateTime,
        severity: Severity,
        owner: &str,
        message: &str,
    ) -> String {
        format!(
            "{:>tw$}:    {:<sw$} - {:<ow$} - {}",
            timestamp.format(TIMESTAMP_FORMAT).to_string(),
            severity.as_str(),
            owner,
            message,
            tw = TIMESTAMP_WIDTH,
            sw = SEVERITY_WIDTH,
            ow = OWNER_WIDTH,
        )
    }
}

fn parse_placeholder(template: &str, spec: &str) -> Result<(usize, i64)> {
    if spec.contains(':') {
        return Err(DualLogError::format(
            template,
            format!(
                "format specifier in {{{}}} is not supported, arguments are pre-rendered",
                spec
            ),
        ));
    }

    let (index_part, alignment_part) = match spec.split_once(',') {
        Some((index, alignment)) => (index, Some(alignment)),
        None => (spec, None),
    };

    let index = index_part.trim().parse::<usize>().map_err(|_| {
        DualLogError::format(template, format!("invalid placeholder index {:?}", index_part))
    })?;

    let alignment = match alignment_part {
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
            DualLogError::format(template, format!("invalid alignment {:?}", raw))
        })?,
        None => 0,
    };

    if alignment.unsigned_abs() > MAX_ALIGNMENT as u64 {
        return Err(DualLogError::format(
            template,
            format!("alignment out of range in {{{}}}, limit is {}", spec, MAX_ALIGNMENT),
        ));
    }

    Ok((index, alignment))
}

fn push_aligned(output: &mut String, value: &str, alignment: i64) {
    let width = alignment.unsigned_abs() as usize;
    if alignment > 0 {
        output.push_str(&format!("{:>width$}", value, width = width));
    } else if alignment < 0 {
        output.push_str(&format!("{:<width$}", value, width = width));
    } else {
        output.push_str(value);
    }
}
