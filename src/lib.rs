//! # DocQA Client
//!
//! 文档上传 / 管理 / 问答服务的客户端交互状态机
//!
//! ## 架构设计
//!
//! OCR 与问答推理、文档持久化都由远端服务完成，本 crate 只负责客户端状态：
//! 已知文档、当前选中、提问模式，以及进行中的异步操作的生命周期。
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 把本地文件变成 `FileHandle`
//! - `FilePicker` - 选择器，按扩展名过滤
//! - `DropZone` - 拖放区域，高亮只是视觉状态
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 远端请求 / 响应契约，不缓存任何状态
//! - `DocumentRepository` - 列表 / 上传 / 删除
//! - `QuestionService` - 单文档提问 / 交叉核对
//! - `HttpDocumentClient` - 基于 reqwest 的实现
//!
//! ### ③ 状态层（Workflow）
//! - `workflow/` - 纯同步的状态转移
//! - `Selection` - (模式, 动作) → 新选中集合
//! - `StatusReporter` - busy / error / success 的唯一持有者
//! - `AppState` - 所有状态的集中结构
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/upload` - 顺序批量上传，首个失败即中止
//! - `orchestrator/question` - 前置校验 + 单文档 / 交叉核对提问
//! - `orchestrator/delete` - 确认 → 删除 → 刷新 → 取消选中
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{DocumentRepository, HttpDocumentClient, QuestionService};
pub use config::Config;
pub use error::{AppError, AppResult, ValidationError};
pub use infrastructure::FileHandle;
pub use models::{Document, DocumentId, FileType};
pub use orchestrator::{DeleteOrchestrator, QuestionOrchestrator, UploadOrchestrator};
pub use workflow::{AppState, QuestionMode, Selection, Status};
