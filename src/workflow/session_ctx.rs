//! 页面间传递的会话上下文

/// 登录后各页面共享的身份信息
///
/// userID 由 check-session 返回，department 由登录响应返回；
/// 两者随页面跳转一路携带，扮演原页面查询参数的角色
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCtx {
    pub user_id: u64,
    pub department: String,
}

impl SessionCtx {
    pub fn new(user_id: u64, department: impl Into<String>) -> Self {
        Self {
            user_id,
            department: department.into(),
        }
    }
}
