//! 文档快照刷新

use tracing::{info, warn};

use crate::clients::DocumentRepository;
use crate::models::Document;
use crate::workflow::{AppState, StatusReporter};

pub const FETCH_FAILED: &str = "Failed to fetch documents";

/// 重新获取文档列表并整体替换快照
///
/// 失败时保留旧快照，并报告错误。返回是否刷新成功。
pub async fn refresh_snapshot(
    repo: &dyn DocumentRepository,
    documents: &mut Vec<Document>,
    status: &StatusReporter,
) -> bool {
    match repo.list_documents().await {
        Ok(fresh) => {
            info!("📄 文档列表已刷新: {} 个文档", fresh.len());
            *documents = fresh;
            true
        }
        Err(e) => {
            warn!("⚠️ 获取文档列表失败: {}", e);
            status.report_error(e.user_message(FETCH_FAILED));
            false
        }
    }
}

/// 独立的刷新操作（启动时 / 用户手动刷新）
pub async fn refresh(repo: &dyn DocumentRepository, state: &mut AppState) -> bool {
    refresh_snapshot(repo, &mut state.documents, &state.status).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::test_support::FakeService;

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let fake = FakeService::with_documents(&["a.pdf", "b.png"]);
        let mut state = AppState::default();

        assert!(refresh(&fake, &mut state).await);
        assert_eq!(state.documents.len(), 2);
        assert_eq!(state.documents[1].filename, "b.png");
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_old_snapshot() {
        let fake = FakeService::with_documents(&["a.pdf"]);
        let mut state = AppState::default();
        refresh(&fake, &mut state).await;

        fake.fail_list(None);
        assert!(!refresh(&fake, &mut state).await);
        assert_eq!(state.documents.len(), 1);
        assert_eq!(state.status.snapshot().error.as_deref(), Some(FETCH_FAILED));
    }
}
