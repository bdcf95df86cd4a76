use std::path::{Path, PathBuf};
use crate::error::{AppError, AppResult};

/// 文件名只允许单层路径段，拒绝分隔符、回溯和绝对路径
pub fn is_clean_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(['/', '\\'])
        && !name.contains("..")
        && !Path::new(name).is_absolute()
}

/// 规范化后校验 path 必须位于 base 之内（防符号链接逃逸）
pub fn validate_path(path: &Path, base: &Path) -> AppResult<PathBuf> {
    let canonical_base = base.canonicalize().map_err(|_| AppError::AccessDenied)?;

    let canonical_path = path.canonicalize().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound
        } else {
            AppError::AccessDenied
        }
    })?;

    if !canonical_path.starts_with(&canonical_base) {
        return Err(AppError::AccessDenied);
    }

    Ok(canonical_path)
}
