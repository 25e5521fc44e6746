//! 提问编排器 - 编排层
//!
//! 流程顺序：
//! 1. 前置条件校验（问题非空 → 模式与选中数量匹配），第一个失败即返回，不发请求
//! 2. 置 busy，清空 error / success / answer
//! 3. 按模式发出单文档或交叉核对请求
//! 4. 保存答案或报告错误，释放 busy

use tracing::{error, info};

use crate::clients::QuestionService;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::DocumentId;
use crate::utils::truncate_text;
use crate::workflow::{AppState, QuestionMode, Selection};

pub const ASK_FAILED: &str = "Failed to get answer";

/// 校验通过后的请求目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskTarget {
    Single(DocumentId),
    CrossCheck(Vec<DocumentId>),
}

/// 按顺序校验前置条件
pub fn validate(
    mode: QuestionMode,
    selection: &Selection,
    question: &str,
) -> Result<AskTarget, ValidationError> {
    if question.trim().is_empty() {
        return Err(ValidationError::EmptyQuestion);
    }

    match mode {
        QuestionMode::Single => match selection.ids() {
            [only] => Ok(AskTarget::Single(only.clone())),
            _ => Err(ValidationError::SingleSelectionRequired),
        },
        QuestionMode::CrossCheck => {
            if selection.len() < 2 {
                Err(ValidationError::CrossCheckSelectionTooSmall)
            } else {
                Ok(AskTarget::CrossCheck(selection.ids().to_vec()))
            }
        }
    }
}

/// 提问编排器
pub struct QuestionOrchestrator<'a> {
    service: &'a dyn QuestionService,
}

impl<'a> QuestionOrchestrator<'a> {
    pub fn new(service: &'a dyn QuestionService) -> Self {
        Self { service }
    }

    /// 提问，成功时答案同时写入 `state.answer`
    pub async fn run(&self, state: &mut AppState, question: &str) -> AppResult<String> {
        let target = match validate(state.mode, &state.selection, question) {
            Ok(target) => target,
            Err(v) => {
                info!("提问被拒绝: {}", v);
                state.status.reject(v.to_string());
                return Err(AppError::Validation(v));
            }
        };

        let guard = state.status.begin();
        state.answer = None;

        info!("❓ [{}] {}", state.mode, truncate_text(question, 80));

        let result = match &target {
            AskTarget::Single(id) => self.service.ask_single(id, question).await,
            AskTarget::CrossCheck(ids) => self.service.ask_cross_check(ids, question).await,
        };

        match result {
            Ok(answer) => {
                info!("✓ 收到回答: {}", truncate_text(&answer, 80));
                state.answer = Some(answer.clone());
                Ok(answer)
            }
            Err(e) => {
                error!("❌ 提问失败: {}", e);
                guard.fail(e.user_message(ASK_FAILED));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::test_support::{Call, FakeService};

    fn state_with(mode: QuestionMode, ids: &[&str]) -> AppState {
        let mut state = AppState::default();
        state.set_mode(QuestionMode::CrossCheck);
        for id in ids {
            state.select(DocumentId::new(*id));
        }
        state.set_mode(mode);
        state
    }

    #[test]
    fn test_validation_order() {
        let empty = Selection::new();
        // 问题为空优先于选中数量
        assert_eq!(
            validate(QuestionMode::Single, &empty, "  \n"),
            Err(ValidationError::EmptyQuestion)
        );
        assert_eq!(
            validate(QuestionMode::Single, &empty, "why?"),
            Err(ValidationError::SingleSelectionRequired)
        );
        assert_eq!(
            validate(QuestionMode::CrossCheck, &empty, "why?"),
            Err(ValidationError::CrossCheckSelectionTooSmall)
        );
    }

    #[tokio::test]
    async fn test_single_mode_wrong_count_sends_nothing() {
        let fake = FakeService::new();
        for ids in [&[][..], &["a", "b"][..], &["a", "b", "c"][..]] {
            let mut state = state_with(QuestionMode::Single, ids);
            let result = QuestionOrchestrator::new(&fake).run(&mut state, "what?").await;

            assert!(matches!(
                result,
                Err(AppError::Validation(ValidationError::SingleSelectionRequired))
            ));
            assert_eq!(
                state.status.snapshot().error.as_deref(),
                Some("Please select exactly one document for single document questions")
            );
            assert!(!state.status.is_busy());
        }
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cross_check_needs_two() {
        let fake = FakeService::new();
        let mut state = state_with(QuestionMode::CrossCheck, &["b"]);

        let result = QuestionOrchestrator::new(&fake).run(&mut state, "compare").await;

        assert!(result.is_err());
        assert_eq!(
            state.status.snapshot().error.as_deref(),
            Some("Please select at least 2 documents for cross-checking")
        );
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_single_ask_addresses_sole_document() {
        let fake = FakeService::new();
        let mut state = state_with(QuestionMode::Single, &["a"]);
        fake.probe_busy(state.status.subscribe());

        let answer = QuestionOrchestrator::new(&fake)
            .run(&mut state, "What does it say?")
            .await
            .unwrap();

        assert_eq!(answer, "answer about a");
        assert_eq!(state.answer.as_deref(), Some("answer about a"));
        assert_eq!(
            fake.calls(),
            vec![Call::AskSingle(DocumentId::new("a"), "What does it say?".into())]
        );
        assert_eq!(fake.busy_samples(), vec![true]);
        assert!(!state.status.is_busy());
        // 选中集合与模式保持不变
        assert_eq!(state.selection.ids(), &[DocumentId::new("a")]);
        assert_eq!(state.mode, QuestionMode::Single);
    }

    #[tokio::test]
    async fn test_cross_check_sends_ordered_selection() {
        let fake = FakeService::new();
        let mut state = state_with(QuestionMode::CrossCheck, &["c", "a", "b"]);

        QuestionOrchestrator::new(&fake).run(&mut state, "agree?").await.unwrap();

        assert_eq!(
            fake.calls(),
            vec![Call::AskCrossCheck(
                vec![DocumentId::new("c"), DocumentId::new("a"), DocumentId::new("b")],
                "agree?".into()
            )]
        );
    }

    #[tokio::test]
    async fn test_failure_clears_answer_and_reports_detail() {
        let fake = FakeService::new();
        let mut state = state_with(QuestionMode::Single, &["a"]);
        state.answer = Some("previous".to_string());

        fake.fail_ask(Some("Document not found"));
        let result = QuestionOrchestrator::new(&fake).run(&mut state, "hm?").await;

        assert!(result.is_err());
        assert_eq!(state.answer, None);
        let status = state.status.snapshot();
        assert_eq!(status.error.as_deref(), Some("Document not found"));
        assert!(!status.busy);
    }

    #[tokio::test]
    async fn test_failure_without_detail_uses_fallback() {
        let fake = FakeService::new();
        fake.fail_ask(None);
        let mut state = state_with(QuestionMode::CrossCheck, &["a", "b"]);

        let _ = QuestionOrchestrator::new(&fake).run(&mut state, "hm?").await;

        assert_eq!(state.status.snapshot().error.as_deref(), Some(ASK_FAILED));
    }
}
