/// 文档服务 HTTP 客户端
///
/// 封装所有与远端文档 / 问答 API 相关的调用逻辑
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::{DocumentRepository, QuestionService};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::FileHandle;
use crate::models::{
    AnswerResponse, CrossCheckRequest, Document, DocumentId, DocumentList, ErrorBody,
    HealthStatus, QuestionRequest,
};

/// 文档服务客户端
#[derive(Clone)]
pub struct HttpDocumentClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpDocumentClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let base_url = Url::parse(config.api_base_url.trim_end_matches('/')).map_err(|e| {
            AppError::Config(format!("api_base_url 无效 {}: {}", config.api_base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "api_base_url 不能作为基础地址: {}",
                config.api_base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// 服务健康检查
    pub async fn health(&self) -> AppResult<HealthStatus> {
        let endpoint = "/health";
        let response = self
            .http
            .get(self.url(&["health"])?)
            .send()
            .await
            .map_err(|e| AppError::network(endpoint, e))?;

        decode(endpoint, ensure_success(endpoint, response).await?).await
    }

    /// 在基础地址后逐段追加路径，每段单独做百分号编码
    ///
    /// 文档 ID 是不透明字符串，其中的 `/`、`?`、`#` 不能改变请求的目标。
    fn url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("api_base_url 不能作为基础地址: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl DocumentRepository for HttpDocumentClient {
    async fn list_documents(&self) -> AppResult<Vec<Document>> {
        let endpoint = "/documents";
        debug!("GET {}", endpoint);

        let response = self
            .http
            .get(self.url(&["documents"])?)
            .send()
            .await
            .map_err(|e| AppError::network(endpoint, e))?;

        let list: DocumentList = decode(endpoint, ensure_success(endpoint, response).await?).await?;
        debug!("获取到 {} 个文档", list.documents.len());
        Ok(list.documents)
    }

    async fn upload_document(&self, file: &FileHandle) -> AppResult<()> {
        let endpoint = "/documents";
        debug!("POST {} ({}, {} 字节)", endpoint, file.filename, file.bytes.len());

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(file.content_type())
            .map_err(|e| AppError::network(endpoint, e))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.url(&["documents"])?)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::network(endpoint, e))?;

        // 响应体是新建的文档，客户端不使用，刷新列表时会重新获取
        ensure_success(endpoint, response).await?;
        Ok(())
    }

    async fn delete_document(&self, id: &DocumentId) -> AppResult<()> {
        let endpoint = format!("/documents/{}", id);
        debug!("DELETE {}", endpoint);

        let response = self
            .http
            .delete(self.url(&["documents", id.as_str()])?)
            .send()
            .await
            .map_err(|e| AppError::network(endpoint.as_str(), e))?;

        ensure_success(&endpoint, response)
            .await
            .map_err(|e| not_found_for(id, e))?;
        Ok(())
    }
}

#[async_trait]
impl QuestionService for HttpDocumentClient {
    async fn ask_single(&self, id: &DocumentId, question: &str) -> AppResult<String> {
        let endpoint = format!("/documents/{}/question", id);
        debug!("POST {}", endpoint);

        let response = self
            .http
            .post(self.url(&["documents", id.as_str(), "question"])?)
            .json(&QuestionRequest { question })
            .send()
            .await
            .map_err(|e| AppError::network(endpoint.as_str(), e))?;

        let response = ensure_success(&endpoint, response)
            .await
            .map_err(|e| not_found_for(id, e))?;
        let body: AnswerResponse = decode(&endpoint, response).await?;
        Ok(body.answer)
    }

    async fn ask_cross_check(&self, ids: &[DocumentId], question: &str) -> AppResult<String> {
        let endpoint = "/documents/cross-check";
        debug!("POST {} ({} 个文档)", endpoint, ids.len());

        let response = self
            .http
            .post(self.url(&["documents", "cross-check"])?)
            .json(&CrossCheckRequest {
                question,
                document_ids: ids,
            })
            .send()
            .await
            .map_err(|e| AppError::network(endpoint, e))?;

        let body: AnswerResponse = decode(endpoint, ensure_success(endpoint, response).await?).await?;
        Ok(body.answer)
    }
}

// ========== 响应处理 ==========

/// 非 2xx 响应转换为 `AppError::Server`，并尽量提取 `detail`
async fn ensure_success(endpoint: &str, response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let detail = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail_text());

    warn!("⚠️ {} 返回 {}: {:?}", endpoint, status, detail);

    Err(AppError::Server {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        detail,
    })
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AppError::network(endpoint, e))?;

    serde_json::from_slice(&bytes).map_err(|source| AppError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn not_found_for(id: &DocumentId, err: AppError) -> AppError {
    match err {
        AppError::Server { status, detail, .. } if status == StatusCode::NOT_FOUND.as_u16() => {
            AppError::NotFound {
                id: id.to_string(),
                detail,
            }
        }
        other => other,
    }
}
