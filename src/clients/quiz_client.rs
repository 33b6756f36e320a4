/// 测验目录服务客户端
///
/// 封装部门/测验列表、创建、更新与删除调用。
/// 创建流程的两步依赖（先建头部拿 quizID，再逐题提交）由
/// workflow::CreateQuizFlow 编排，本客户端只负责单次调用。
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::clients::http::expect_success;
use crate::config::Config;
use crate::error::AppError;
use crate::models::catalog::{Department, QuizSummary};
use crate::models::quiz::{QuestionPayload, QuizHeader, QuizRecord, UpdateQuestionPayload};
use crate::workflow::create_flow::QuizWriter;

/// 测验目录客户端
pub struct QuizClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuizClient {
    /// 创建新的目录客户端
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.quiz_service_url.clone(),
        }
    }

    /// 列出全部部门及测验数量
    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        let endpoint = format!("{}/departments", self.base_url);
        self.get_json(&endpoint).await
    }

    /// 列出某个部门下的测验
    pub async fn list_department_quizzes(&self, department: &str) -> Result<Vec<QuizSummary>> {
        let endpoint = format!("{}/departments/{}", self.base_url, department);
        self.get_json(&endpoint).await
    }

    /// 列出全部测验（管理页）
    pub async fn list_all_quizzes(&self) -> Result<Vec<QuizSummary>> {
        let endpoint = format!("{}/quizzes", self.base_url);
        self.get_json(&endpoint).await
    }

    /// 按 id 拉取完整测验（更新页）
    pub async fn fetch_quiz(&self, quiz_id: u64) -> Result<QuizRecord> {
        let endpoint = format!("{}/quiz/{}", self.base_url, quiz_id);
        self.get_json(&endpoint).await
    }

    /// 更新测验头部，department 不在请求体中（不可变）
    pub async fn update_quiz(
        &self,
        quiz_id: u64,
        user_id: u64,
        title: &str,
        description: &str,
    ) -> Result<()> {
        let endpoint = format!("{}/quiz/{}/{}", self.base_url, quiz_id, user_id);
        let body = json!({ "title": title, "description": description });

        debug!("更新测验 Payload: {}", body);

        let response = self
            .http
            .put(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        expect_success(response, &endpoint)?;
        Ok(())
    }

    /// 更新单个题目
    pub async fn update_question(
        &self,
        quiz_id: u64,
        question_id: u64,
        user_id: u64,
        payload: &UpdateQuestionPayload,
    ) -> Result<()> {
        let endpoint = format!(
            "{}/quiz/{}/question/{}/{}",
            self.base_url, quiz_id, question_id, user_id
        );

        debug!("更新题目 Payload: {}", serde_json::to_string(payload)?);

        let response = self
            .http
            .put(&endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        expect_success(response, &endpoint)?;
        Ok(())
    }

    /// 删除测验
    pub async fn delete_quiz(&self, quiz_id: u64, user_id: u64) -> Result<()> {
        let endpoint = format!("{}/quiz/{}/{}", self.base_url, quiz_id, user_id);

        let response = self
            .http
            .delete(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        expect_success(response, &endpoint)?;
        Ok(())
    }

    /// GET 并反序列化 JSON 响应
    async fn get_json<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(endpoint, e))?;

        let value = expect_success(response, endpoint)?
            .json()
            .await
            .map_err(AppError::from)?;

        Ok(value)
    }
}

#[async_trait]
impl QuizWriter for QuizClient {
    /// 创建测验头部，返回服务端分配的 quizID
    async fn create_quiz(&self, user_id: u64, header: &QuizHeader) -> Result<u64> {
        let endpoint = format!("{}/createquiz/{}", self.base_url, user_id);

        debug!("创建测验 Payload: {}", serde_json::to_string(header)?);

        let response = self
            .http
            .post(&endpoint)
            .json(header)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let result: Value = expect_success(response, &endpoint)?
            .json()
            .await
            .map_err(AppError::from)?;

        // 没有 quizID 就无法提交任何题目，视为调用失败
        let quiz_id = result
            .get("quizID")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| AppError::api_empty_response(&endpoint))?;

        Ok(quiz_id)
    }

    /// 在已创建的测验下追加一道题目
    async fn create_question(
        &self,
        quiz_id: u64,
        user_id: u64,
        question: &QuestionPayload,
    ) -> Result<()> {
        let endpoint = format!("{}/quiz/{}/question/{}", self.base_url, quiz_id, user_id);

        debug!("创建题目 Payload: {}", serde_json::to_string(question)?);

        let response = self
            .http
            .post(&endpoint)
            .json(question)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        expect_success(response, &endpoint)?;
        Ok(())
    }
}
