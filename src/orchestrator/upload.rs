//! 上传编排器 - 编排层
//!
//! ## 职责
//!
//! 接收一批文件（来自选择器或拖放），逐个顺序上传，汇总成一个结果。
//!
//! ## 批次策略
//!
//! - 第 i+1 个文件的请求在第 i 个完成之后才发出
//! - 第一个失败立即中止剩余上传，已上传的文件不回滚
//! - 全部成功后刷新文档快照

use futures::{stream, StreamExt, TryStreamExt};
use tracing::{error, info};

use super::refresh::refresh_snapshot;
use crate::clients::DocumentRepository;
use crate::error::AppError;
use crate::infrastructure::FileHandle;
use crate::utils::logging::{log_batch_complete, log_batch_start};
use crate::workflow::AppState;

pub const UPLOAD_FAILED: &str = "Failed to upload file(s)";

/// 一次批量上传的结果
#[derive(Debug)]
pub enum UploadOutcome {
    /// 空批次，什么都没做
    Skipped,
    /// 全部上传成功
    Completed { attempted: usize },
    /// 中途失败，后续文件未上传
    Aborted {
        /// 失败之前已确认成功的数量
        uploaded: usize,
        attempted: usize,
        failed_file: String,
        error: AppError,
    },
}

/// 成功提示文案（按尝试数量计数）
pub fn success_message(attempted: usize) -> String {
    format!("Successfully uploaded {} file(s)", attempted)
}

/// 批次中断时携带的信息
struct BatchFailure {
    uploaded: usize,
    failed_file: String,
    error: AppError,
}

/// 上传编排器
pub struct UploadOrchestrator<'a> {
    repo: &'a dyn DocumentRepository,
}

impl<'a> UploadOrchestrator<'a> {
    pub fn new(repo: &'a dyn DocumentRepository) -> Self {
        Self { repo }
    }

    /// 上传一批文件
    pub async fn run(&self, state: &mut AppState, files: Vec<FileHandle>) -> UploadOutcome {
        if files.is_empty() {
            return UploadOutcome::Skipped;
        }

        let attempted = files.len();
        let guard = state.status.begin();
        log_batch_start(attempted);

        match self.upload_sequentially(&files).await {
            Ok(uploaded) => {
                log_batch_complete(uploaded, attempted);
                guard.succeed(success_message(attempted));
                refresh_snapshot(self.repo, &mut state.documents, guard.reporter()).await;
                UploadOutcome::Completed { attempted }
            }
            Err(failure) => {
                error!("❌ 上传 {} 失败: {}", failure.failed_file, failure.error);
                log_batch_complete(failure.uploaded, attempted);
                guard.fail(failure.error.user_message(UPLOAD_FAILED));
                UploadOutcome::Aborted {
                    uploaded: failure.uploaded,
                    attempted,
                    failed_file: failure.failed_file,
                    error: failure.error,
                }
            }
        }
    }

    /// 顺序折叠：成功则计数 +1，第一个失败终止整个折叠
    async fn upload_sequentially(&self, files: &[FileHandle]) -> Result<usize, BatchFailure> {
        let repo = self.repo;
        let total = files.len();

        stream::iter(files.iter().enumerate())
            .map(Ok::<_, BatchFailure>)
            .try_fold(0usize, move |uploaded, (index, file)| async move {
                info!("📤 [{}/{}] 上传 {}", index + 1, total, file.filename);
                repo.upload_document(file).await.map_err(|error| BatchFailure {
                    uploaded,
                    failed_file: file.filename.clone(),
                    error,
                })?;
                info!("✓ [{}/{}] {} 上传成功", index + 1, total, file.filename);
                Ok::<_, BatchFailure>(uploaded + 1)
            })
            .await
    }
}
