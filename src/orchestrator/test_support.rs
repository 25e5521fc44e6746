//! 编排层单元测试共用的假服务
//!
//! 记录每一次调用，并在调用发生时采样 busy 标志。

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::watch;

use crate::clients::{DocumentRepository, QuestionService};
use crate::error::{AppError, AppResult};
use crate::infrastructure::FileHandle;
use crate::models::{Document, DocumentId, FileType};
use crate::workflow::Status;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    List,
    Upload(String),
    Delete(DocumentId),
    AskSingle(DocumentId, String),
    AskCrossCheck(Vec<DocumentId>, String),
}

/// 脚本化的失败：`None` 表示没有 detail
type Failure = Option<String>;

#[derive(Default)]
pub(crate) struct FakeService {
    calls: Mutex<Vec<Call>>,
    documents: Mutex<Vec<Document>>,
    upload_failures: Mutex<HashMap<String, Failure>>,
    list_failure: Mutex<Option<Failure>>,
    delete_failure: Mutex<Option<Failure>>,
    ask_failure: Mutex<Option<Failure>>,
    probe: Mutex<Option<watch::Receiver<Status>>>,
    busy_samples: Mutex<Vec<bool>>,
    next_id: Mutex<usize>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(names: &[&str]) -> Self {
        let fake = Self::new();
        for name in names {
            fake.insert(name);
        }
        fake
    }

    /// 在每次调用时采样 busy
    pub fn probe_busy(&self, rx: watch::Receiver<Status>) {
        *self.probe.lock().unwrap() = Some(rx);
    }

    pub fn fail_upload_of(&self, filename: &str, detail: Option<&str>) {
        self.upload_failures
            .lock()
            .unwrap()
            .insert(filename.to_string(), detail.map(str::to_string));
    }

    pub fn fail_list(&self, detail: Option<&str>) {
        *self.list_failure.lock().unwrap() = Some(detail.map(str::to_string));
    }

    pub fn fail_delete(&self, detail: Option<&str>) {
        *self.delete_failure.lock().unwrap() = Some(detail.map(str::to_string));
    }

    pub fn fail_ask(&self, detail: Option<&str>) {
        *self.ask_failure.lock().unwrap() = Some(detail.map(str::to_string));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn busy_samples(&self) -> Vec<bool> {
        self.busy_samples.lock().unwrap().clone()
    }

    /// 按文件名查找 ID
    pub fn id_of(&self, filename: &str) -> DocumentId {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.filename == filename)
            .map(|d| d.id.clone())
            .unwrap_or_else(|| panic!("no document named {}", filename))
    }

    fn insert(&self, filename: &str) -> DocumentId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let id = DocumentId::new(format!("doc-{}", *next));
        let file_type = match filename.rsplit('.').next() {
            Some("pdf") => FileType::Pdf,
            Some("txt") => FileType::Text,
            Some("png" | "jpg" | "jpeg" | "gif" | "webp") => FileType::Image,
            _ => FileType::Other,
        };
        self.documents.lock().unwrap().push(Document {
            id: id.clone(),
            filename: filename.to_string(),
            file_type,
            uploaded_at: Some(chrono::Utc::now()),
        });
        id
    }

    fn record(&self, call: Call) {
        if let Some(rx) = self.probe.lock().unwrap().as_ref() {
            self.busy_samples.lock().unwrap().push(rx.borrow().busy);
        }
        self.calls.lock().unwrap().push(call);
    }
}

fn server_error(endpoint: &str, status: u16, detail: Failure) -> AppError {
    AppError::Server {
        endpoint: endpoint.to_string(),
        status,
        detail,
    }
}

#[async_trait]
impl DocumentRepository for FakeService {
    async fn list_documents(&self) -> AppResult<Vec<Document>> {
        self.record(Call::List);
        if let Some(detail) = self.list_failure.lock().unwrap().clone() {
            return Err(server_error("/documents", 500, detail));
        }
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn upload_document(&self, file: &FileHandle) -> AppResult<()> {
        self.record(Call::Upload(file.filename.clone()));
        tokio::task::yield_now().await;
        if let Some(detail) = self.upload_failures.lock().unwrap().get(&file.filename).cloned() {
            return Err(server_error("/documents", 400, detail));
        }
        self.insert(&file.filename);
        Ok(())
    }

    async fn delete_document(&self, id: &DocumentId) -> AppResult<()> {
        self.record(Call::Delete(id.clone()));
        if let Some(detail) = self.delete_failure.lock().unwrap().clone() {
            return Err(AppError::NotFound {
                id: id.to_string(),
                detail,
            });
        }
        let mut docs = self.documents.lock().unwrap();
        let before = docs.len();
        docs.retain(|d| &d.id != id);
        if docs.len() == before {
            return Err(AppError::NotFound {
                id: id.to_string(),
                detail: Some("Document not found".to_string()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionService for FakeService {
    async fn ask_single(&self, id: &DocumentId, question: &str) -> AppResult<String> {
        self.record(Call::AskSingle(id.clone(), question.to_string()));
        if let Some(detail) = self.ask_failure.lock().unwrap().clone() {
            return Err(server_error("/documents/{id}/question", 500, detail));
        }
        Ok(format!("answer about {}", id))
    }

    async fn ask_cross_check(&self, ids: &[DocumentId], question: &str) -> AppResult<String> {
        self.record(Call::AskCrossCheck(ids.to_vec(), question.to_string()));
        if let Some(detail) = self.ask_failure.lock().unwrap().clone() {
            return Err(server_error("/documents/cross-check", 500, detail));
        }
        Ok(format!("cross-checked {} documents", ids.len()))
    }
}

pub(crate) fn file(name: &str) -> FileHandle {
    FileHandle::new(name, name.as_bytes().to_vec())
}
