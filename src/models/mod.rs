pub mod catalog;
pub mod loaders;
pub mod quiz;
pub mod take;

pub use catalog::{Department, QuizScore, QuizSummary};
pub use loaders::{load_all_quiz_drafts, load_quiz_draft};
pub use quiz::{
    AnswerOption, DraftQuestion, QuestionPayload, QuizDraft, QuizField, QuizHeader, QuizRecord,
    StoredOption, StoredQuestion, UpdateQuestionPayload,
};
pub use take::{TakeOption, TakeQuestion, TakeQuiz, UserAnswer};
