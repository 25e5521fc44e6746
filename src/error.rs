//! 错误类型
//!
//! 所有失败最终都在编排层被渲染成一条面向用户的字符串，
//! 这里负责把传输层 / 服务端 / 本地校验的失败统一成 `AppError`。

use thiserror::Error;

/// 本地前置条件校验失败（不会发出任何网络请求）
///
/// `Display` 即为展示给用户的固定文案。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 问题为空（trim 之后）
    #[error("Please enter a question")]
    EmptyQuestion,
    /// 单文档模式下选中数量不等于 1
    #[error("Please select exactly one document for single document questions")]
    SingleSelectionRequired,
    /// 交叉核对模式下选中数量少于 2
    #[error("Please select at least 2 documents for cross-checking")]
    CrossCheckSelectionTooSmall,
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 本地校验错误
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// 网络请求失败（连接、超时、读取响应体等）
    #[error("网络请求失败 ({endpoint}): {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// 服务端返回非 2xx 响应
    #[error("服务端返回错误响应 ({endpoint}): status={status}, detail={detail:?}")]
    Server {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },

    /// 文档在服务端不存在
    #[error("文档不存在: {id}")]
    NotFound { id: String, detail: Option<String> },

    /// 响应体解析失败
    #[error("响应解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// 本地文件读取失败或文件类型不受支持
    #[error("文件错误 ({path}): {message}")]
    Intake { path: String, message: String },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl AppError {
    /// 服务端提供的 `detail` 文本（如果有）
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Server { detail, .. } | AppError::NotFound { detail, .. } => {
                detail.as_deref().filter(|d| !d.trim().is_empty())
            }
            _ => None,
        }
    }

    /// 面向用户的错误文案
    ///
    /// 校验错误返回固定文案；服务端错误优先使用 `detail`，否则使用调用方给定的兜底文案。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(v) => v.to_string(),
            _ => self.detail().unwrap_or(fallback).to_string(),
        }
    }

    /// 创建网络请求失败错误
    pub fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Network {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// 创建文件错误
    pub fn intake(path: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Intake {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
