//! 文档数据模型与服务端请求 / 响应结构

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 文档 ID（服务端分配，客户端视为不透明字符串）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// 文件类型（由服务端分类，客户端不重新计算）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Image,
    Text,
    /// 未知或新增的类型
    #[default]
    #[serde(other)]
    Other,
}

impl FileType {
    /// 标签名称
    pub fn label(self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Image => "image",
            FileType::Text => "text",
            FileType::Other => "other",
        }
    }
}

/// 文档快照
///
/// 只由成功的列表请求产生，客户端从不原地修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    #[serde(default)]
    pub file_type: FileType,
    /// 旧版本服务端不返回该字段
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

// ========== 请求 / 响应结构 ==========

/// `GET /documents`
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    pub documents: Vec<Document>,
}

/// `POST /documents/{id}/question`
#[derive(Debug, Clone, Serialize)]
pub struct QuestionRequest<'a> {
    pub question: &'a str,
}

/// `POST /documents/cross-check`
#[derive(Debug, Clone, Serialize)]
pub struct CrossCheckRequest<'a> {
    pub question: &'a str,
    pub document_ids: &'a [DocumentId],
}

/// 问答接口的响应（单文档与交叉核对共用）
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResponse {
    pub answer: String,
}

/// 服务端错误响应体
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// 提取可读的 `detail` 文本
    ///
    /// 校验类错误的 `detail` 可能是数组或对象，此时按 JSON 原样输出。
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_from_full_payload() {
        let doc: Document = serde_json::from_value(json!({
            "id": "5b1c",
            "filename": "a.pdf",
            "file_type": "pdf",
            "uploaded_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(doc.id.as_str(), "5b1c");
        assert_eq!(doc.file_type, FileType::Pdf);
        assert!(doc.uploaded_at.is_some());
    }

    #[test]
    fn test_document_tolerates_missing_and_unknown_fields() {
        let doc: Document = serde_json::from_value(json!({
            "id": "1",
            "filename": "clip.mp4",
            "file_type": "video"
        }))
        .unwrap();

        assert_eq!(doc.file_type, FileType::Other);
        assert_eq!(doc.uploaded_at, None);
    }

    #[test]
    fn test_cross_check_request_shape() {
        let ids = vec![DocumentId::new("a"), DocumentId::new("b")];
        let body = serde_json::to_value(CrossCheckRequest {
            question: "Do they agree?",
            document_ids: &ids,
        })
        .unwrap();

        assert_eq!(body, json!({"question": "Do they agree?", "document_ids": ["a", "b"]}));
    }

    #[test]
    fn test_error_body_detail_text() {
        let body: ErrorBody = serde_json::from_value(json!({"detail": "Document not found"})).unwrap();
        assert_eq!(body.detail_text().as_deref(), Some("Document not found"));

        let body: ErrorBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(body.detail_text(), None);
    }
}
