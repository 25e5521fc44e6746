//! 选择控制器
//!
//! 选中集合的变化只由 (模式, 动作) 决定，是一张纯粹的转移表：
//!
//! | 模式 | 动作 | 结果 |
//! |---|---|---|
//! | single | Select(id) | {id}（替换） |
//! | cross-check | Select(id) | 切换 id 的成员关系 |
//! | 任意 | Deselect(id) | 移除 id（不存在时不变） |

use super::mode::QuestionMode;
use crate::models::DocumentId;

/// 对选中集合的操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    /// 用户点选
    Select(DocumentId),
    /// 文档被删除后移除
    Deselect(DocumentId),
}

/// 有序、无重复的选中文档 ID 集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<DocumentId>,
}

/// 转移函数：(模式, 当前集合, 动作) → 新集合
pub fn transition(mode: QuestionMode, current: &Selection, action: SelectionAction) -> Selection {
    match (mode, action) {
        (QuestionMode::Single, SelectionAction::Select(id)) => Selection { ids: vec![id] },
        (QuestionMode::CrossCheck, SelectionAction::Select(id)) => {
            let mut ids = current.ids.clone();
            match ids.iter().position(|x| *x == id) {
                Some(pos) => {
                    ids.remove(pos);
                }
                None => ids.push(id),
            }
            Selection { ids }
        }
        (_, SelectionAction::Deselect(id)) => Selection {
            ids: current.ids.iter().filter(|x| **x != id).cloned().collect(),
        },
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按当前模式点选
    pub fn select(&mut self, mode: QuestionMode, id: DocumentId) {
        *self = transition(mode, self, SelectionAction::Select(id));
    }

    /// 删除确认后调用，与模式无关
    pub fn deselect_on_delete(&mut self, id: &DocumentId) {
        // Deselect 分支不看模式
        *self = transition(QuestionMode::Single, self, SelectionAction::Deselect(id.clone()));
    }

    pub fn ids(&self) -> &[DocumentId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.ids.contains(id)
    }
}
