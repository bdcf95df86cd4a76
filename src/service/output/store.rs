use std::path::{Path, PathBuf};
use crate::error::{AppError, AppResult};
use crate::util;

/// 产物目录的唯一拥有者：生成文件名、写入产物、受限解析读取路径
/// 写入和读取两侧都通过注入的同一个实例访问目录
pub struct OutputStore {
    dir: PathBuf,
}

impl OutputStore {
    pub fn new(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 文件名格式：<purpose>_<unix 时间戳>_<8 位随机十六进制>.<ext>
    /// 随机后缀有 32 位熵，不做存在性检查
    pub fn generate_filename(&self, purpose: &str, ext: &str) -> AppResult<String> {
        let timestamp = util::time::unix_timestamp();
        let suffix = util::id::random_hex(4)?;
        Ok(format!("{}_{}_{}.{}", purpose, timestamp, suffix, ext))
    }

    /// 产物的唯一写入口
    pub async fn write(&self, filename: &str, content: &str) -> AppResult<PathBuf> {
        let path = self.dir.join(filename);
        tokio::fs::write(&path, content).await?;
        Ok(path)
    }

    /// 在任何文件 IO 之前先做字符串级检查，再做规范化包含检查
    pub fn resolve(&self, filename: &str) -> AppResult<PathBuf> {
        if !util::path::is_clean_filename(filename) {
            tracing::warn!("⚠️  检测到可疑的文件访问请求: {:?}", filename);
            return Err(AppError::AccessDenied);
        }

        util::path::validate_path(&self.dir.join(filename), &self.dir)
    }

    pub async fn read(&self, filename: &str) -> AppResult<Vec<u8>> {
        let path = self.resolve(filename)?;
        Ok(tokio::fs::read(&path).await?)
    }
}
