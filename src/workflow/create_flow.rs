//! 创建测验的提交编排 - 流程层
//!
//! 流程顺序：
//! 1. 提交测验头部，取得服务端分配的 quizID
//! 2. 按草稿顺序逐题提交，一次一题，不并发
//! 3. 任一步失败立即终止，后续题目不再提交
//!
//! 已提交成功的题目不回滚，部分持久化是接受的结果；
//! 调用方只得到一个整体成败信号，细节进诊断日志。

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{error, info};

use crate::config::Config;
use crate::models::quiz::{QuestionPayload, QuizDraft, QuizHeader};
use crate::workflow::session_ctx::SessionCtx;

/// 创建流程依赖的目录服务写入能力
///
/// QuizClient 是生产实现；测试用桩实现注入失败
#[async_trait]
pub trait QuizWriter {
    /// 创建测验头部，返回服务端分配的 quizID
    async fn create_quiz(&self, user_id: u64, header: &QuizHeader) -> Result<u64>;

    /// 在指定测验下创建一道题目
    async fn create_question(
        &self,
        quiz_id: u64,
        user_id: u64,
        question: &QuestionPayload,
    ) -> Result<()>;
}

/// 创建测验流程
pub struct CreateQuizFlow {
    verbose_logging: bool,
}

impl CreateQuizFlow {
    /// 创建新的提交流程
    pub fn new(config: &Config) -> Self {
        Self {
            verbose_logging: config.verbose_logging,
        }
    }

    /// 执行完整的创建序列，成功时返回 quizID
    pub async fn run(
        &self,
        writer: &dyn QuizWriter,
        ctx: &SessionCtx,
        draft: &QuizDraft,
    ) -> Result<u64> {
        let total = draft.questions.len();

        info!("📤 正在创建测验「{}」({} 道题目)...", draft.title, total);

        // 第一步：头部。失败则整个序列终止，一道题都不会提交
        let quiz_id = writer
            .create_quiz(ctx.user_id, &draft.header())
            .await
            .map_err(|e| {
                error!("❌ 测验头部创建失败: {}", e);
                e
            })
            .context("测验头部创建失败")?;

        info!("✓ 测验头部已创建，quizID = {}", quiz_id);

        // 第二步：按原始顺序逐题提交。quizID 必须先到位，所以不并发
        for (index, question) in draft.questions.iter().enumerate() {
            if self.verbose_logging {
                self.log_question(index, total, &question.text);
            }

            writer
                .create_question(quiz_id, ctx.user_id, &question.to_payload())
                .await
                .map_err(|e| {
                    error!(
                        "❌ 第 {}/{} 道题目提交失败: {}（之前已提交的题目不回滚）",
                        index + 1,
                        total,
                        e
                    );
                    e
                })
                .with_context(|| format!("第 {} 道题目提交失败", index + 1))?;
        }

        info!("✅ 测验创建完成: quizID = {}, 共 {} 道题目", quiz_id, total);

        Ok(quiz_id)
    }

    /// 显示题干预览
    fn log_question(&self, index: usize, total: usize, text: &str) {
        let preview = if text.chars().count() > 40 {
            text.chars().take(40).collect::<String>() + "..."
        } else {
            text.to_string()
        };
        info!("处理第 {}/{} 道题目: {}", index + 1, total, preview);
    }
}
