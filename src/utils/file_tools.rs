//! 文件工具模块
//!
//! 提供日志文件追加写入所需的目录管理与写入辅助函数。
//! 这里只返回 `std::io::Result`，由调用方决定映射成哪种 `DualLogError`。

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// 文件工具结构体
///
/// 提供各种文件操作的静态方法
pub struct FileTools;

impl FileTools {
    /// 确保目录存在，如果不存在则创建
    ///
    /// # 返回值
    ///
    /// 新建了目录时返回 `Ok(true)`，目录已存在时返回 `Ok(false)`
    pub fn ensure_directory_exists<P: AsRef<Path>>(path: P) -> io::Result<bool> {
        let path = path.as_ref();

        if !path.exists() {
            fs::create_dir_all(path)?;
            tracing::debug!("Created log directory {}", path.display());
            Ok(true)
        } else if !path.is_dir() {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("路径存在但不是目录: {}", path.display()),
            ))
        } else {
            Ok(false)
        }
    }

    /// 确保文件的父目录存在
    ///
    /// 只有文件名的相对路径（父目录为空）视为当前目录，不做任何事。
    pub fn ensure_parent_exists<P: AsRef<Path>>(file_path: P) -> io::Result<bool> {
        match file_path.as_ref().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Self::ensure_directory_exists(parent),
            _ => Ok(false),
        }
    }

    /// 以追加模式一次性写入数据并刷新
    ///
    /// # 参数
    ///
    /// * `file_path` - 文件路径
    /// * `data` - 要写入的数据
    /// * `create_parents` - 是否创建父目录
    ///
    /// # 返回值
    ///
    /// 成功时返回写入的字节数
    pub fn append_to_file<P: AsRef<Path>>(
        file_path: P,
        data: &[u8],
        create_parents: bool,
    ) -> io::Result<usize> {
        let file_path = file_path.as_ref();

        if create_parents {
            Self::ensure_parent_exists(file_path)?;
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(file_path)?;

        file.write_all(data)?;
        file.flush()?;

        Ok(data.len())
    }
}
