//! 注册表单的客户端校验
//!
//! 与浏览器端的 required/格式检查对应：密码至少 8 位，邮箱正则粗检。
//! 真正的约束在服务端，这里只做提交前的快速拦截。

use regex::Regex;

use crate::error::{AppError, AppResult, FormError};

/// 邮箱格式正则（与原表单一致的宽松检查）
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// 校验注册表单字段
pub fn validate_register_form(email: &str, password: &str) -> AppResult<()> {
    if password.chars().count() < 8 {
        return Err(AppError::Form(FormError::PasswordTooShort));
    }

    let email_re = Regex::new(EMAIL_PATTERN)
        .map_err(|e| AppError::Other(format!("邮箱正则编译失败: {}", e)))?;

    if !email_re.is_match(email) {
        return Err(AppError::Form(FormError::InvalidEmail));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_form() {
        assert!(validate_register_form("user@example.com", "longenough").is_ok());
    }

    #[test]
    fn rejects_short_password() {
        assert!(validate_register_form("user@example.com", "short").is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(validate_register_form("not-an-email", "longenough").is_err());
        assert!(validate_register_form("a b@example.com", "longenough").is_err());
        assert!(validate_register_form("user@example", "longenough").is_err());
    }
}
