//! 文件接收 - 基础设施层
//!
//! 把本地文件读成 `FileHandle`，只负责"拿到字节"，不关心上传流程。

use phf::phf_map;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

/// 选择器接受的扩展名 → 上传时使用的 MIME 类型
static ACCEPTED_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "pdf" => "application/pdf",
    "txt" => "text/plain",
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "png" => "image/png",
    "gif" => "image/gif",
    "webp" => "image/webp",
};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// 待上传的单个文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl FileHandle {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// 从磁盘读取文件
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| AppError::intake(path.display().to_string(), "不是文件路径"))?;

        let bytes = fs::read(path)
            .await
            .map_err(|e| AppError::intake(path.display().to_string(), e.to_string()))?;

        debug!("读取文件 {} ({} 字节)", filename, bytes.len());
        Ok(Self { filename, bytes })
    }

    /// multipart 分段使用的 Content-Type（按扩展名推断）
    pub fn content_type(&self) -> &'static str {
        extension_of(&self.filename)
            .and_then(|ext| ACCEPTED_TYPES.get(ext.as_str()).copied())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
    }
}

/// 文件名是否在选择器的接受列表中
pub fn is_accepted(filename: &str) -> bool {
    extension_of(filename).is_some_and(|ext| ACCEPTED_TYPES.contains_key(ext.as_str()))
}

/// 接受列表的展示文本
pub fn accepted_extensions() -> String {
    let mut exts: Vec<_> = ACCEPTED_TYPES.keys().map(|e| format!(".{}", e)).collect();
    exts.sort();
    exts.join(",")
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// 文件选择器
///
/// 按接受列表过滤：不在列表中的文件直接跳过并告警。
pub struct FilePicker;

impl FilePicker {
    pub async fn pick(paths: &[PathBuf]) -> AppResult<Vec<FileHandle>> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            if !is_accepted(&name) {
                warn!("⚠️ 跳过不支持的文件: {} (支持: {})", path.display(), accepted_extensions());
                continue;
            }
            files.push(FileHandle::from_path(path).await?);
        }
        Ok(files)
    }
}
