//! 拖放区域
//!
//! dragover / dragleave 只切换视觉高亮，不影响任何编排状态；
//! drop 取出文件列表，交给与选择器相同的上传路径。

use std::path::PathBuf;

use super::file_intake::FileHandle;
use crate::error::AppResult;

#[derive(Debug, Default)]
pub struct DropZone {
    highlighted: bool,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_over(&mut self) {
        self.highlighted = true;
    }

    pub fn drag_leave(&mut self) {
        self.highlighted = false;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// 读取被拖入的文件（不做扩展名过滤，由服务端判定）
    pub async fn drop(&mut self, paths: &[PathBuf]) -> AppResult<Vec<FileHandle>> {
        self.highlighted = false;
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(FileHandle::from_path(path).await?);
        }
        Ok(files)
    }
}
