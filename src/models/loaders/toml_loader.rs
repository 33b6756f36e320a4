//! 从 TOML 文件批量导入测验草稿
//!
//! 管理页支持从文件创建测验，文件格式与 QuizDraft 一一对应：
//!
//! ```toml
//! title = "Rust 入门测验"
//! description = "所有权与借用"
//! department = "Engineering"
//!
//! [[questions]]
//! text = "哪个关键字声明不可变绑定？"
//! options = [
//!     { text = "let", is_correct = true },
//!     { text = "mut", is_correct = false },
//!     { text = "var", is_correct = false },
//!     { text = "const", is_correct = false },
//! ]
//! ```

use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{AppError, FileError};
use crate::models::quiz::QuizDraft;

/// 从单个 TOML 文件加载测验草稿
///
/// 加载后立即校验互斥勾选不变式，不合法的文件在提交任何请求前被拒绝
pub async fn load_quiz_draft(toml_file_path: &Path) -> Result<QuizDraft> {
    if !toml_file_path.exists() {
        return Err(AppError::File(FileError::NotFound {
            path: toml_file_path.display().to_string(),
        })
        .into());
    }

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(toml_file_path.display().to_string(), e))?;

    let draft: QuizDraft = toml::from_str(&content)
        .map_err(|e| AppError::toml_parse_failed(toml_file_path.display().to_string(), e))?;

    draft.validate()?;

    Ok(draft)
}

/// 从文件夹加载所有 TOML 草稿
///
/// 单个文件加载失败只记录警告，不影响其余文件
pub async fn load_all_quiz_drafts(folder_path: &str) -> Result<Vec<QuizDraft>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut drafts = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            tracing::info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match load_quiz_draft(&path).await {
                Ok(draft) => {
                    tracing::info!("成功加载 {} 道题目", draft.questions.len());
                    drafts.push(draft);
                }
                Err(e) => {
                    tracing::warn!("加载文件失败 {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_DRAFT: &str = r#"
title = "Rust 入门测验"
description = "所有权与借用"
department = "Engineering"

[[questions]]
text = "哪个关键字声明不可变绑定？"
options = [
    { text = "let", is_correct = true },
    { text = "mut", is_correct = false },
    { text = "var", is_correct = false },
    { text = "const", is_correct = false },
]
"#;

    #[test]
    fn load_valid_draft_from_file() {
        let path = std::env::temp_dir().join("quiz_portal_loader_valid.toml");
        std::fs::write(&path, VALID_DRAFT).expect("应能写入临时文件");

        let draft = tokio_test::block_on(load_quiz_draft(&path)).expect("应能加载草稿");
        assert_eq!(draft.title, "Rust 入门测验");
        assert_eq!(draft.questions.len(), 1);
        assert_eq!(draft.questions[0].answer(), "let");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn reject_draft_with_two_correct_options() {
        let broken = VALID_DRAFT.replace(
            r#"{ text = "mut", is_correct = false }"#,
            r#"{ text = "mut", is_correct = true }"#,
        );
        let path = std::env::temp_dir().join("quiz_portal_loader_broken.toml");
        std::fs::write(&path, broken).expect("应能写入临时文件");

        let result = tokio_test::block_on(load_quiz_draft(&path));
        assert!(result.is_err());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("quiz_portal_loader_missing.toml");
        let result = tokio_test::block_on(load_quiz_draft(&path));
        assert!(result.is_err());
    }

    #[test]
    fn folder_scan_skips_broken_files() {
        let folder = std::env::temp_dir().join("quiz_portal_loader_folder");
        std::fs::create_dir_all(&folder).expect("应能创建临时文件夹");
        std::fs::write(folder.join("valid.toml"), VALID_DRAFT).expect("应能写入临时文件");
        std::fs::write(folder.join("broken.toml"), "title = ").expect("应能写入临时文件");

        let drafts = tokio_test::block_on(load_all_quiz_drafts(
            folder.to_str().expect("临时路径应为合法 UTF-8"),
        ))
        .expect("文件夹扫描应成功");

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Rust 入门测验");

        let _ = std::fs::remove_dir_all(&folder);
    }
}
