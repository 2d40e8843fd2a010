//! 单一文件 Sink
//!
//! 每次调用向目标文件追加一条已格式化的记录。进程内所有文件 sink 共用一把锁，
//! 写入不同文件也会被串行化，从而保证记录之间不交错。

use crate::config::FileConfig;
use crate::error::{DualLogError, Result};
use crate::utils::FileTools;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// 全局文件追加锁
static FILE_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// 单一文件 Sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    /// 目标文件
    path: PathBuf,
    /// 每条记录后的行尾
    line_ending: String,
    /// 是否自动创建父目录
    create_directories: bool,
}

impl FileSink {
    /// 使用默认文件配置创建 sink
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, &FileConfig::default())
    }

    /// 使用指定文件配置创建 sink
    pub fn with_config(path: impl Into<PathBuf>, config: &FileConfig) -> Self {
        Self {
            path: path.into(),
            line_ending: config.line_ending.clone(),
            create_directories: config.create_directories,
        }
    }

    /// 获取目标文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 预先创建父目录，日志器获取时调用
    pub fn prepare(&self) -> Result<()> {
        if self.create_directories {
            FileTools::ensure_parent_exists(&self.path)
                .map_err(|e| DualLogError::sink_write(&self.path, e))?;
        }
        Ok(())
    }

    /// 追加一条记录
    pub fn write_line(&self, line: &str) -> Result<()> {
        append_locked(&self.path, line, &self.line_ending, self.create_directories)
    }

    /// 在全局锁下向 `path` 追加 `line` 与换行符，必要时创建父目录
    pub fn append(path: impl AsRef<Path>, line: &str) -> Result<()> {
        append_locked(path.as_ref(), line, "\n", true)
    }
}

fn append_locked(path: &Path, line: &str, line_ending: &str, create_directories: bool) -> Result<()> {
    let mut record = String::with_capacity(line.len() + line_ending.len());
    record.push_str(line);
    record.push_str(line_ending);

    // 锁只保护一次写入，持锁期间的 panic 不影响后续写入
    let _guard = FILE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    FileTools::append_to_file(path, record.as_bytes(), create_directories)
        .map_err(|e| DualLogError::sink_write(path, e))?;
    Ok(())
}
