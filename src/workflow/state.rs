//! 应用状态
//!
//! 文档快照、选中集合、提问模式、状态、答案集中在一个结构里，
//! 编排器在整个操作期间以 `&mut AppState` 独占持有，保证同一时刻只有一个写者。

use tracing::{debug, warn};

use super::mode::QuestionMode;
use super::selection::Selection;
use super::status::StatusReporter;
use crate::config::Config;
use crate::models::{Document, DocumentId};

#[derive(Debug)]
pub struct AppState {
    /// 最近一次成功获取的文档快照
    pub documents: Vec<Document>,
    pub selection: Selection,
    pub mode: QuestionMode,
    pub status: StatusReporter,
    /// 最近一次成功的回答
    pub answer: Option<String>,
    cross_check_soft_limit: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            documents: Vec::new(),
            selection: Selection::new(),
            mode: QuestionMode::default(),
            status: StatusReporter::new(),
            answer: None,
            cross_check_soft_limit: config.cross_check_soft_limit,
        }
    }

    /// 按当前模式点选文档
    pub fn select(&mut self, id: DocumentId) {
        self.selection.select(self.mode, id);
        debug!("当前选中 {} 个文档", self.selection.len());

        if self.mode == QuestionMode::CrossCheck && self.selection.len() > self.cross_check_soft_limit {
            warn!(
                "⚠️ 已选中 {} 个文档，超过建议的 {} 个，服务端可能拒绝",
                self.selection.len(),
                self.cross_check_soft_limit
            );
        }
    }

    /// 切换模式
    ///
    /// 不清空也不校验选中集合，校验推迟到提问时进行。
    pub fn set_mode(&mut self, mode: QuestionMode) {
        if self.mode != mode {
            debug!("提问模式: {} → {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// 提问按钮是否可用（不忙、问题非空、至少选中一个）
    ///
    /// 只用于展示，真正的前置条件由提问编排器校验。
    pub fn can_ask(&self, question: &str) -> bool {
        !self.status.is_busy() && !question.trim().is_empty() && !self.selection.is_empty()
    }

    pub fn find_document(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| &d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_switch_preserves_selection() {
        let mut state = AppState::default();
        state.select(DocumentId::new("b"));
        state.set_mode(QuestionMode::CrossCheck);
        assert_eq!(state.selection.ids(), &[DocumentId::new("b")]);

        state.select(DocumentId::new("a"));
        state.set_mode(QuestionMode::Single);
        assert_eq!(state.selection.len(), 2);
    }

    #[test]
    fn test_can_ask() {
        let mut state = AppState::default();
        assert!(!state.can_ask("what?"));

        state.select(DocumentId::new("a"));
        assert!(state.can_ask("what?"));
        assert!(!state.can_ask("   "));

        let _guard = state.status.begin();
        assert!(!state.can_ask("what?"));
    }
}
