/// 用户/会话服务客户端
///
/// 封装注册、登录、会话检查与登出调用；登录成功后会话 cookie
/// 由共享的 HTTP 客户端持有，后续请求自动携带
use anyhow::Result;
use serde_json::{json, Value};
use tracing::debug;

use crate::clients::http::expect_success;
use crate::config::Config;
use crate::error::{AppError, SessionError};

/// 用户服务客户端
pub struct UserClient {
    http: reqwest::Client,
    base_url: String,
}

impl UserClient {
    /// 创建新的用户服务客户端
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.user_service_url.clone(),
        }
    }

    /// 注册新用户
    ///
    /// # 参数
    /// - `name`: 用户名
    /// - `email`: 邮箱
    /// - `password`: 密码（客户端校验后的明文）
    /// - `department`: 所属部门
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        department: &str,
    ) -> Result<()> {
        let endpoint = format!("{}/register", self.base_url);
        let body = json!({
            "name": name,
            "email": email,
            "password": password,
            "department": department,
        });

        debug!("注册用户 {} ({}), 部门 {}", name, email, department);

        let response = self
            .http
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        expect_success(response, &endpoint)?;
        Ok(())
    }

    /// 登录，返回用户所属部门
    ///
    /// 成功时服务端通过 Set-Cookie 建立会话
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let endpoint = format!("{}/login", self.base_url);
        let body = json!({ "email": email, "password": password });

        let response = self
            .http
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let result: Value = expect_success(response, &endpoint)?
            .json()
            .await
            .map_err(AppError::from)?;

        let department = result
            .get("department")
            .and_then(|v| v.as_str())
            .ok_or(AppError::Session(SessionError::MissingDepartment))?;

        Ok(department.to_string())
    }

    /// 检查当前会话，返回服务端识别的用户 ID
    pub async fn check_session(&self) -> Result<u64> {
        let endpoint = format!("{}/check-session", self.base_url);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let result: Value = expect_success(response, &endpoint)?
            .json()
            .await
            .map_err(AppError::from)?;

        let user_id = result
            .get("userID")
            .and_then(|v| v.as_u64())
            .ok_or(AppError::Session(SessionError::MissingUserId))?;

        Ok(user_id)
    }

    /// 登出并失效会话
    pub async fn logout(&self) -> Result<()> {
        let endpoint = format!("{}/logout", self.base_url);

        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        expect_success(response, &endpoint)?;
        Ok(())
    }
}
