//! 资源定位与读取

use ioc_common::{ReadError, ReadResult};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 资源加载器 trait
///
/// 把来源标识解析为文档全文，是读取器对外部存储的唯一依赖。
/// 每次读取独立获取并释放底层资源。
pub trait ResourceLoader: Send + Sync {
    /// 读取指定位置的文档全文
    fn load(&self, location: &str) -> ReadResult<String>;
}

/// 基于文件系统的资源加载器
///
/// 相对路径相对固定基准目录解析，绝对路径绕过基准目录。
#[derive(Debug, Clone)]
pub struct FileSystemResourceLoader {
    base_dir: PathBuf,
}

impl FileSystemResourceLoader {
    /// 以基准目录创建加载器
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// 基准目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl ResourceLoader for FileSystemResourceLoader {
    fn load(&self, location: &str) -> ReadResult<String> {
        let path = self.resolve(location);
        debug!("读取资源: {}", path.display());
        fs::read_to_string(&path).map_err(|source| ReadError::SourceUnreadable {
            location: path.display().to_string(),
            source,
        })
    }
}

/// 内存资源加载器
///
/// 以位置到文档内容的映射提供资源，用于测试与演示场景。
#[derive(Debug, Default, Clone)]
pub struct StaticResourceLoader {
    documents: HashMap<String, String>,
}

impl StaticResourceLoader {
    /// 创建空的加载器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一份文档
    pub fn with_document(
        mut self,
        location: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.documents.insert(location.into(), content.into());
        self
    }
}

impl ResourceLoader for StaticResourceLoader {
    fn load(&self, location: &str) -> ReadResult<String> {
        self.documents
            .get(location)
            .cloned()
            .ok_or_else(|| ReadError::SourceUnreadable {
                location: location.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "资源不存在"),
            })
    }
}
