/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 用户/会话服务地址
    pub user_service_url: String,
    /// 测验目录服务地址
    pub quiz_service_url: String,
    /// 答题/评分服务地址
    pub test_service_url: String,
    /// 单个请求超时时间（秒），超时后不重试
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_service_url: "http://localhost:8023".to_string(),
            quiz_service_url: "http://localhost:8021".to_string(),
            test_service_url: "http://localhost:8024".to_string(),
            request_timeout_secs: 30,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            user_service_url: std::env::var("USER_SERVICE_URL").unwrap_or(default.user_service_url),
            quiz_service_url: std::env::var("QUIZ_SERVICE_URL").unwrap_or(default.quiz_service_url),
            test_service_url: std::env::var("TEST_SERVICE_URL").unwrap_or(default.test_service_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_to_local_services() {
        let config = Config::default();
        assert_eq!(config.user_service_url, "http://localhost:8023");
        assert_eq!(config.quiz_service_url, "http://localhost:8021");
        assert_eq!(config.test_service_url, "http://localhost:8024");
        assert!(config.request_timeout_secs > 0);
    }
}
