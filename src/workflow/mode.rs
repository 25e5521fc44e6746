//! 提问模式

use std::fmt::Display;
use std::str::FromStr;

/// 提问模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionMode {
    /// 针对恰好一个文档提问
    #[default]
    Single,
    /// 针对两个及以上文档交叉核对
    CrossCheck,
}

impl QuestionMode {
    /// 模式说明（对应界面上的提示）
    pub fn hint(self) -> &'static str {
        match self {
            QuestionMode::Single => "Select exactly 1 document",
            QuestionMode::CrossCheck => "Select 2-5 documents for cross-checking",
        }
    }
}

impl Display for QuestionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionMode::Single => write!(f, "single"),
            QuestionMode::CrossCheck => write!(f, "cross-check"),
        }
    }
}

impl FromStr for QuestionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "s" => Ok(QuestionMode::Single),
            "cross-check" | "crosscheck" | "cross" | "c" => Ok(QuestionMode::CrossCheck),
            other => Err(format!("未知的提问模式: {}", other)),
        }
    }
}
