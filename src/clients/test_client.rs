/// 答题/评分服务客户端
///
/// 封装开始答题、提交答案与查询得分调用
use anyhow::Result;
use tracing::debug;

use crate::clients::http::expect_success;
use crate::config::Config;
use crate::error::AppError;
use crate::models::catalog::QuizScore;
use crate::models::take::{TakeQuiz, UserAnswer};

/// 答题服务客户端
pub struct TestClient {
    http: reqwest::Client,
    base_url: String,
}

impl TestClient {
    /// 创建新的答题服务客户端
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.test_service_url.clone(),
        }
    }

    /// 拉取待答题的完整测验
    pub async fn start_quiz(&self, quiz_id: u64) -> Result<TakeQuiz> {
        let endpoint = format!("{}/quizzes/{}/start", self.base_url, quiz_id);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let quiz = expect_success(response, &endpoint)?
            .json()
            .await
            .map_err(AppError::from)?;

        Ok(quiz)
    }

    /// 提交答案数组，服务端据此评分
    pub async fn submit_answers(
        &self,
        quiz_id: u64,
        user_id: u64,
        answers: &[UserAnswer],
    ) -> Result<()> {
        let endpoint = format!("{}/quizzes/{}/submit/{}", self.base_url, quiz_id, user_id);

        debug!("提交答案 Payload: {}", serde_json::to_string(answers)?);

        let response = self
            .http
            .post(&endpoint)
            .json(answers)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        expect_success(response, &endpoint)?;
        Ok(())
    }

    /// 查询用户的全部得分
    ///
    /// 用户还没有任何成绩时服务端返回 null，按空列表处理
    pub async fn fetch_scores(&self, user_id: u64) -> Result<Vec<QuizScore>> {
        let endpoint = format!("{}/users/scores/{}", self.base_url, user_id);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let scores: Option<Vec<QuizScore>> = expect_success(response, &endpoint)?
            .json()
            .await
            .map_err(AppError::from)?;

        Ok(scores.unwrap_or_default())
    }
}
