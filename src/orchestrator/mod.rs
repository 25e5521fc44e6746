//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 每个编排器驱动"一次逻辑上的异步操作"，通过 `StatusReporter` 汇报进度，
//! 成功后让文档仓库客户端刷新快照。
//!
//! ## 模块划分
//!
//! ### `upload` - 上传编排器
//! - 接收一批文件（选择器 / 拖放）
//! - 逐个顺序上传，第一个失败即中止
//!
//! ### `question` - 提问编排器
//! - 校验问题、模式、选中数量
//! - 发出单文档或交叉核对请求
//!
//! ### `delete` - 删除流程
//! - 确认 → 删除 → 刷新 → 取消选中
//!
//! ### `refresh` - 文档快照刷新
//!
//! ## 层次关系
//!
//! ```text
//! app (命令循环)
//!     ↓
//! orchestrator (upload / question / delete / refresh)
//!     ↓
//! workflow (AppState: selection / mode / status)
//!     ↓
//! clients (DocumentRepository / QuestionService)
//! ```
//!
//! ## 设计原则
//!
//! 1. **独占写入**：编排器在整个操作期间以 `&mut AppState` 持有状态
//! 2. **busy 守卫**：`StatusReporter::begin()` 的守卫在所有退出路径上释放 busy
//! 3. **不重试**：任何传输失败都终结本次尝试

pub mod delete;
pub mod question;
pub mod refresh;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_support;

pub use delete::{AlwaysConfirm, Confirm, DeleteOrchestrator, DeleteOutcome};
pub use question::{validate, AskTarget, QuestionOrchestrator};
pub use refresh::refresh;
pub use upload::{UploadOrchestrator, UploadOutcome};
