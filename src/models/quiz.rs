//! 测验表单模型
//!
//! 创建页使用 QuizDraft（无服务端 id），更新页使用 QuizRecord（带服务端 id）。
//! 两者共享同一条互斥勾选规则：每道题最多一个正确选项，勾选某个选项时
//! 清除所有兄弟选项的勾选状态（后写覆盖）。
//!
//! answer 字段不冗余存储：提交时由当前勾选的选项文本即时推导，
//! 勾选之后再修改选项文本也会反映到提交数据中。

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, FormError};

/// 创建流程中每道题固定的选项数量
pub const OPTIONS_PER_QUESTION: usize = 4;

/// 测验选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

impl AnswerOption {
    fn empty() -> Self {
        Self {
            text: String::new(),
            is_correct: false,
        }
    }
}

/// 草稿中的单个题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftQuestion {
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl DraftQuestion {
    /// 创建一道空题目：四个空选项，全部未勾选
    pub fn seeded() -> Self {
        Self {
            text: String::new(),
            options: (0..OPTIONS_PER_QUESTION).map(|_| AnswerOption::empty()).collect(),
        }
    }

    /// 当前勾选选项的文本，未勾选时为空字符串
    pub fn answer(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.is_correct)
            .map(|o| o.text.as_str())
            .unwrap_or("")
    }

    /// 转换为创建题目接口的请求体
    pub fn to_payload(&self) -> QuestionPayload {
        QuestionPayload {
            text: self.text.clone(),
            answer: self.answer().to_string(),
            options: self.options.clone(),
        }
    }
}

/// 测验头部的可编辑字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizField {
    Title,
    Description,
    Department,
}

/// 测验草稿（创建页的表单模型）
///
/// 由创建页独占持有，不跨页共享；服务端是唯一的持久存储，
/// 离开页面即丢弃草稿。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub department: String,
    pub questions: Vec<DraftQuestion>,
}

impl QuizDraft {
    /// 创建空草稿，预置一道空题目
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            department: String::new(),
            questions: vec![DraftQuestion::seeded()],
        }
    }

    /// 覆写头部标量字段
    pub fn set_field(&mut self, field: QuizField, value: impl Into<String>) {
        let value = value.into();
        match field {
            QuizField::Title => self.title = value,
            QuizField::Description => self.description = value,
            QuizField::Department => self.department = value,
        }
    }

    /// 覆写题目文本，索引越界时静默忽略
    pub fn set_question_text(&mut self, index: usize, value: impl Into<String>) {
        if let Some(question) = self.questions.get_mut(index) {
            question.text = value.into();
        }
    }

    /// 覆写选项文本，不影响兄弟选项
    pub fn set_option_text(&mut self, q_index: usize, o_index: usize, value: impl Into<String>) {
        if let Some(question) = self.questions.get_mut(q_index) {
            if let Some(option) = question.options.get_mut(o_index) {
                option.text = value.into();
            }
        }
    }

    /// 勾选/取消正确选项
    ///
    /// flag = true 时互斥勾选：同题所有选项中仅 o_index 为正确。
    /// flag = false 的显式取消路径在界面上不可达，保留为 no-op。
    pub fn set_option_correct(&mut self, q_index: usize, o_index: usize, flag: bool) {
        if !flag {
            return;
        }
        if let Some(question) = self.questions.get_mut(q_index) {
            if o_index >= question.options.len() {
                return;
            }
            for (i, option) in question.options.iter_mut().enumerate() {
                option.is_correct = i == o_index;
            }
        }
    }

    /// 在末尾追加一道空题目，数量无上限
    pub fn add_question(&mut self) {
        self.questions.push(DraftQuestion::seeded());
    }

    /// 提取创建测验接口的头部请求体
    pub fn header(&self) -> QuizHeader {
        QuizHeader {
            title: self.title.clone(),
            description: self.description.clone(),
            department: self.department.clone(),
        }
    }

    /// 提交前校验：每道题 4 个选项、恰好一个正确选项
    ///
    /// 交互式编辑按构造满足该不变式，校验主要拦截 TOML 导入的草稿
    pub fn validate(&self) -> AppResult<()> {
        for (index, question) in self.questions.iter().enumerate() {
            if question.options.len() != OPTIONS_PER_QUESTION {
                return Err(AppError::Form(FormError::WrongOptionCount {
                    question: index,
                    count: question.options.len(),
                }));
            }
            let correct = question.options.iter().filter(|o| o.is_correct).count();
            if correct == 0 {
                return Err(AppError::Form(FormError::MissingCorrectOption { question: index }));
            }
            if correct > 1 {
                return Err(AppError::Form(FormError::MultipleCorrectOptions { question: index }));
            }
        }
        Ok(())
    }
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// 创建测验接口的头部请求体
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuizHeader {
    pub title: String,
    pub description: String,
    pub department: String,
}

/// 创建/更新题目接口的请求体
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPayload {
    pub text: String,
    pub answer: String,
    pub options: Vec<AnswerOption>,
}

// ========== 更新流程使用的持久化类型 ==========

/// 服务端返回的选项（带 id）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredOption {
    pub id: u64,
    pub text: String,
    pub is_correct: bool,
}

/// 服务端返回的题目（带 id），选项数量保持服务端返回的原样
#[derive(Debug, Clone, Deserialize)]
pub struct StoredQuestion {
    pub id: u64,
    pub text: String,
    pub options: Vec<StoredOption>,
}

impl StoredQuestion {
    /// 当前勾选选项的文本，未勾选时为空字符串
    pub fn answer(&self) -> &str {
        self.options
            .iter()
            .find(|o| o.is_correct)
            .map(|o| o.text.as_str())
            .unwrap_or("")
    }

    /// 转换为更新题目接口的请求体
    pub fn to_payload(&self) -> UpdateQuestionPayload {
        UpdateQuestionPayload {
            text: self.text.clone(),
            answer: self.answer().to_string(),
            options: self.options.clone(),
        }
    }
}

/// 更新题目接口的请求体
#[derive(Debug, Clone, Serialize)]
pub struct UpdateQuestionPayload {
    pub text: String,
    pub answer: String,
    pub options: Vec<StoredOption>,
}

/// 按 id 拉取的完整测验（更新页的表单模型）
#[derive(Debug, Clone, Deserialize)]
pub struct QuizRecord {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub department: String,
    pub questions: Vec<StoredQuestion>,
}

impl QuizRecord {
    /// 覆写头部标量字段，department 在更新页不可编辑
    pub fn set_field(&mut self, field: QuizField, value: impl Into<String>) {
        match field {
            QuizField::Title => self.title = value.into(),
            QuizField::Description => self.description = value.into(),
            QuizField::Department => {}
        }
    }

    /// 覆写题目文本，索引越界时静默忽略
    pub fn set_question_text(&mut self, index: usize, value: impl Into<String>) {
        if let Some(question) = self.questions.get_mut(index) {
            question.text = value.into();
        }
    }

    /// 覆写选项文本，不影响兄弟选项
    pub fn set_option_text(&mut self, q_index: usize, o_index: usize, value: impl Into<String>) {
        if let Some(question) = self.questions.get_mut(q_index) {
            if let Some(option) = question.options.get_mut(o_index) {
                option.text = value.into();
            }
        }
    }

    /// 互斥勾选正确选项，规则与草稿一致
    pub fn set_option_correct(&mut self, q_index: usize, o_index: usize, flag: bool) {
        if !flag {
            return;
        }
        if let Some(question) = self.questions.get_mut(q_index) {
            if o_index >= question.options.len() {
                return;
            }
            for (i, option) in question.options.iter_mut().enumerate() {
                option.is_correct = i == o_index;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_with_options(texts: [&str; 4]) -> QuizDraft {
        let mut draft = QuizDraft::new();
        for (i, text) in texts.iter().enumerate() {
            draft.set_option_text(0, i, *text);
        }
        draft
    }

    #[test]
    fn new_draft_has_one_seeded_question() {
        let draft = QuizDraft::new();
        assert_eq!(draft.questions.len(), 1);
        assert_eq!(draft.questions[0].options.len(), OPTIONS_PER_QUESTION);
        assert!(draft.questions[0].options.iter().all(|o| !o.is_correct));
    }

    #[test]
    fn add_question_appends_seeded_question() {
        let mut draft = QuizDraft::new();
        draft.add_question();
        draft.add_question();
        assert_eq!(draft.questions.len(), 3);
        let last = draft.questions.last().unwrap();
        assert_eq!(last.options.len(), 4);
        assert!(last.options.iter().all(|o| !o.is_correct));
    }

    #[test]
    fn at_most_one_correct_after_any_selection_sequence() {
        let mut draft = draft_with_options(["A", "B", "C", "D"]);
        for o_index in [1, 3, 0, 2, 2, 1] {
            draft.set_option_correct(0, o_index, true);
            let correct = draft.questions[0].options.iter().filter(|o| o.is_correct).count();
            assert_eq!(correct, 1);
        }
    }

    #[test]
    fn reselect_moves_the_correct_flag() {
        let mut draft = draft_with_options(["A", "B", "C", "D"]);
        draft.set_option_correct(0, 0, true);
        draft.set_option_correct(0, 2, true);

        let options = &draft.questions[0].options;
        assert!(!options[0].is_correct);
        assert!(!options[1].is_correct);
        assert!(options[2].is_correct);
        assert!(!options[3].is_correct);
        assert_eq!(draft.questions[0].answer(), "C");
    }

    #[test]
    fn answer_follows_later_text_edit_of_selected_option() {
        let mut draft = draft_with_options(["A", "B", "C", "D"]);
        draft.set_option_correct(0, 1, true);
        assert_eq!(draft.questions[0].answer(), "B");

        // answer 是推导值，选项文本的后续修改直接生效
        draft.set_option_text(0, 1, "B (修订)");
        assert_eq!(draft.questions[0].answer(), "B (修订)");
    }

    #[test]
    fn unchecking_is_a_noop() {
        let mut draft = draft_with_options(["A", "B", "C", "D"]);
        draft.set_option_correct(0, 1, true);
        draft.set_option_correct(0, 1, false);
        assert!(draft.questions[0].options[1].is_correct);
    }

    #[test]
    fn out_of_range_edits_are_silent_noops() {
        let mut draft = QuizDraft::new();
        draft.set_question_text(5, "无效");
        draft.set_option_text(0, 9, "无效");
        draft.set_option_correct(9, 0, true);
        draft.set_option_correct(0, 9, true);
        assert_eq!(draft.questions.len(), 1);
        assert!(draft.questions[0].options.iter().all(|o| !o.is_correct));
    }

    #[test]
    fn payload_contains_derived_answer() {
        let mut draft = draft_with_options(["A", "B", "C", "D"]);
        draft.set_question_text(0, "Q1");
        draft.set_option_correct(0, 1, true);

        let payload = draft.questions[0].to_payload();
        assert_eq!(payload.text, "Q1");
        assert_eq!(payload.answer, "B");
        assert_eq!(payload.options.len(), 4);
    }

    #[test]
    fn validate_rejects_question_without_correct_option() {
        let draft = draft_with_options(["A", "B", "C", "D"]);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn validate_accepts_single_correct_option() {
        let mut draft = draft_with_options(["A", "B", "C", "D"]);
        draft.set_option_correct(0, 0, true);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn record_department_is_immutable() {
        let mut record = QuizRecord {
            id: 7,
            title: "T".to_string(),
            description: "D".to_string(),
            department: "Eng".to_string(),
            questions: Vec::new(),
        };
        record.set_field(QuizField::Department, "HR");
        record.set_field(QuizField::Title, "T2");
        assert_eq!(record.department, "Eng");
        assert_eq!(record.title, "T2");
    }

    #[test]
    fn record_exclusive_select_syncs_answer() {
        let mut record = QuizRecord {
            id: 7,
            title: "T".to_string(),
            description: "D".to_string(),
            department: "Eng".to_string(),
            questions: vec![StoredQuestion {
                id: 11,
                text: "Q1".to_string(),
                options: vec![
                    StoredOption { id: 1, text: "A".to_string(), is_correct: true },
                    StoredOption { id: 2, text: "B".to_string(), is_correct: false },
                    StoredOption { id: 3, text: "C".to_string(), is_correct: false },
                ],
            }],
        };
        record.set_option_correct(0, 2, true);

        let question = &record.questions[0];
        assert!(!question.options[0].is_correct);
        assert!(question.options[2].is_correct);
        assert_eq!(question.to_payload().answer, "C");
    }
}
