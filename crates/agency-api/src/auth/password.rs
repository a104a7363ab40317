//! 密码处理
//!
//! 提供密码哈希、验证与强度校验功能

use bcrypt::{DEFAULT_COST, hash, verify};
use validator::ValidationError;

use crate::error::Result;

const MIN_PASSWORD_LEN: usize = 8;

/// 对密码进行哈希处理
///
/// 使用 bcrypt 算法生成密码哈希
pub fn hash_password(password: &str) -> Result<String> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// 验证密码
///
/// 比较明文密码与存储的哈希值
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    Ok(verify(password, hash)?)
}

/// 密码强度校验，供 validator 的 custom 规则使用
///
/// 至少 8 位，同时包含小写字母、大写字母、数字和符号
pub fn validate_password_strength(password: &str) -> std::result::Result<(), ValidationError> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if long_enough && has_lower && has_upper && has_digit && has_symbol {
        Ok(())
    } else {
        let mut err = ValidationError::new("weak_password");
        err.message = Some("密码至少 8 位，且需包含大小写字母、数字和符号".into());
        Err(err)
    }
}
