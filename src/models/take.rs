//! 答题流程的线上数据结构
//!
//! 答题服务返回 camelCase 字段，与目录服务的 snake_case 不一致，
//! 这里通过 serde rename 统一为 Rust 命名

use serde::{Deserialize, Serialize};

/// 开始答题接口返回的完整测验
#[derive(Debug, Clone, Deserialize)]
pub struct TakeQuiz {
    /// 测验标题
    pub quiz: String,
    pub questions: Vec<TakeQuestion>,
}

/// 答题视角的题目
#[derive(Debug, Clone, Deserialize)]
pub struct TakeQuestion {
    pub id: u64,
    #[serde(rename = "quizID")]
    pub quiz_id: u64,
    pub text: String,
    pub options: Vec<TakeOption>,
}

/// 答题视角的选项
#[derive(Debug, Clone, Deserialize)]
pub struct TakeOption {
    pub id: u64,
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
    #[serde(rename = "questionID")]
    pub question_id: u64,
}

/// 提交答案接口的单条记录
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserAnswer {
    pub question_id: u64,
    pub answer: String,
}
