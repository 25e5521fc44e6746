//! 删除流程 - 编排层
//!
//! 用户确认 → 删除请求 → 刷新快照 → 从选中集合移除。
//! 用户拒绝确认时什么都不做，也不算错误。

use async_trait::async_trait;
use tracing::{error, info};

use super::refresh::refresh_snapshot;
use crate::clients::DocumentRepository;
use crate::error::AppError;
use crate::models::DocumentId;
use crate::workflow::AppState;

pub const CONFIRM_PROMPT: &str = "Are you sure you want to delete this document?";
pub const DELETE_SUCCEEDED: &str = "Document deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete document";

/// 删除前的确认步骤
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// 总是同意（关闭确认时使用）
pub struct AlwaysConfirm;

#[async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug)]
pub enum DeleteOutcome {
    /// 用户取消
    Declined,
    Deleted,
    Failed(AppError),
}

/// 删除编排器
pub struct DeleteOrchestrator<'a> {
    repo: &'a dyn DocumentRepository,
    confirm: &'a dyn Confirm,
}

impl<'a> DeleteOrchestrator<'a> {
    pub fn new(repo: &'a dyn DocumentRepository, confirm: &'a dyn Confirm) -> Self {
        Self { repo, confirm }
    }

    pub async fn run(&self, state: &mut AppState, id: &DocumentId) -> DeleteOutcome {
        if !self.confirm.confirm(CONFIRM_PROMPT).await {
            info!("已取消删除 {}", id);
            return DeleteOutcome::Declined;
        }

        let guard = state.status.begin();
        info!("🗑️ 删除文档 {}", id);

        match self.repo.delete_document(id).await {
            Ok(()) => {
                guard.succeed(DELETE_SUCCEEDED);
                refresh_snapshot(self.repo, &mut state.documents, guard.reporter()).await;
                state.selection.deselect_on_delete(id);
                info!("✓ 文档 {} 已删除", id);
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!("❌ 删除文档 {} 失败: {}", id, e);
                guard.fail(e.user_message(DELETE_FAILED));
                DeleteOutcome::Failed(e)
            }
        }
    }
}
