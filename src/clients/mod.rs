//! 客户端层
//!
//! 远端文档存储与问答服务的请求 / 响应契约。
//! 这一层不缓存任何状态，只负责发请求、翻译错误。

pub mod document_client;

pub use document_client::HttpDocumentClient;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::infrastructure::FileHandle;
use crate::models::{Document, DocumentId};

/// 文档仓库：列表 / 上传 / 删除
///
/// 不做任何重试，是否重试由编排层决定。
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// 获取当前全部文档快照
    async fn list_documents(&self) -> AppResult<Vec<Document>>;

    /// 以单个 multipart 分段上传一个文件
    async fn upload_document(&self, file: &FileHandle) -> AppResult<()>;

    /// 按 ID 删除；服务端不认识该 ID 时返回 `AppError::NotFound`
    async fn delete_document(&self, id: &DocumentId) -> AppResult<()>;
}

/// 问答服务：单文档提问 / 多文档交叉核对
#[async_trait]
pub trait QuestionService: Send + Sync {
    async fn ask_single(&self, id: &DocumentId, question: &str) -> AppResult<String>;

    async fn ask_cross_check(&self, ids: &[DocumentId], question: &str) -> AppResult<String>;
}
