use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// API 调用错误
    Api(ApiError),
    /// 会话/登录错误
    Session(SessionError),
    /// 文件操作错误
    File(FileError),
    /// 表单校验错误
    Form(FormError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API错误: {}", e),
            AppError::Session(e) => write!(f, "会话错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Form(e) => write!(f, "表单错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Api(e) => Some(e),
            AppError::Session(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Form(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// API 调用错误
///
/// 三类失败（网络、非 2xx 状态、响应体缺字段）在调用处统一折叠为本类型，
/// 不做自动重试。
#[derive(Debug)]
pub enum ApiError {
    /// 网络请求失败
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回非成功状态码
    BadResponse { endpoint: String, status: u16 },
    /// API 响应缺少预期字段
    EmptyResponse { endpoint: String },
    /// JSON 解析失败
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { endpoint, source } => {
                write!(f, "API请求失败 ({}): {}", endpoint, source)
            }
            ApiError::BadResponse { endpoint, status } => {
                write!(f, "API返回错误状态 ({}): status={}", endpoint, status)
            }
            ApiError::EmptyResponse { endpoint } => {
                write!(f, "API响应缺少预期字段: {}", endpoint)
            }
            ApiError::JsonParseFailed { source } => write!(f, "JSON解析失败: {}", source),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::RequestFailed { source, .. } | ApiError::JsonParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 会话/登录错误
#[derive(Debug)]
pub enum SessionError {
    /// check-session 响应中没有 userID
    MissingUserId,
    /// 登录响应中没有 department
    MissingDepartment,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::MissingUserId => write!(f, "会话响应中缺少 userID"),
            SessionError::MissingDepartment => write!(f, "登录响应中缺少 department"),
        }
    }
}

impl std::error::Error for SessionError {}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound { path: String },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 表单校验错误（提交前的客户端检查）
#[derive(Debug)]
pub enum FormError {
    /// 密码长度不足 8 位
    PasswordTooShort,
    /// 邮箱格式不合法
    InvalidEmail,
    /// 题目没有勾选正确选项
    MissingCorrectOption { question: usize },
    /// 题目勾选了多个正确选项
    MultipleCorrectOptions { question: usize },
    /// 题目选项数量不是 4 个
    WrongOptionCount { question: usize, count: usize },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::PasswordTooShort => write!(f, "密码长度至少 8 位"),
            FormError::InvalidEmail => write!(f, "邮箱格式不合法"),
            FormError::MissingCorrectOption { question } => {
                write!(f, "第 {} 题没有勾选正确选项", question + 1)
            }
            FormError::MultipleCorrectOptions { question } => {
                write!(f, "第 {} 题勾选了多个正确选项", question + 1)
            }
            FormError::WrongOptionCount { question, count } => {
                write!(f, "第 {} 题有 {} 个选项，应为 4 个", question + 1, count)
            }
        }
    }
}

impl std::error::Error for FormError {}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: err.url().map(|u| u.to_string()).unwrap_or_default(),
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建API错误状态错误
    pub fn api_bad_response(endpoint: impl Into<String>, status: u16) -> Self {
        AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.into(),
            status,
        })
    }

    /// 创建API响应缺字段错误
    pub fn api_empty_response(endpoint: impl Into<String>) -> Self {
        AppError::Api(ApiError::EmptyResponse {
            endpoint: endpoint.into(),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建TOML解析错误
    pub fn toml_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
