//! 页面获取模块
//!
//! 按路径读取站点生成器输出的页面HTML。

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::booklet::error::Result;

/// 页面获取器
///
/// 页面不存在时返回 `Ok(None)`，读取失败时返回错误，两者必须区分。
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, path: &str) -> Result<Option<String>>;
}

/// 从站点构建目录读取页面（`<base>/<path>/index.html`）
#[derive(Debug, Clone)]
pub struct FsPageFetcher {
    base_directory: PathBuf,
}

impl FsPageFetcher {
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Self {
        Self {
            base_directory: base_directory.as_ref().to_path_buf(),
        }
    }

    /// 页面路径对应的文件路径
    pub fn file_path(&self, path: &str) -> PathBuf {
        let relative = path.trim_start_matches('/');
        self.base_directory.join(relative).join("index.html")
    }
}

impl PageFetcher for FsPageFetcher {
    fn fetch(&self, path: &str) -> Result<Option<String>> {
        let file_path = self.file_path(path);
        if !file_path.is_file() {
            debug!(path, file = %file_path.display(), "page file not found");
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(file_path)?))
    }
}

/// 内存中的页面集合，便于嵌入其它程序或测试
#[derive(Debug, Clone, Default)]
pub struct MemoryPageFetcher {
    pages: HashMap<String, String>,
}

impl MemoryPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: impl Into<String>, markup: impl Into<String>) -> Self {
        self.insert(path, markup);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, markup: impl Into<String>) {
        self.pages.insert(path.into(), markup.into());
    }
}

impl PageFetcher for MemoryPageFetcher {
    fn fetch(&self, path: &str) -> Result<Option<String>> {
        Ok(self.pages.get(path).cloned())
    }
}
