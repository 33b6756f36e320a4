pub mod create_flow;
pub mod session_ctx;

pub use create_flow::{CreateQuizFlow, QuizWriter};
pub use session_ctx::SessionCtx;
