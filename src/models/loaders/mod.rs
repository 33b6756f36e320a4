pub mod toml_loader;

pub use toml_loader::{load_all_quiz_drafts, load_quiz_draft};
