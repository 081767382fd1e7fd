//! User-facing (Korean) messages for auth outcomes.

use crate::error::{IdentityError, ValidationError};

pub const SIGN_UP_SUCCESS: &str = "회원가입 성공! 로그인을 진행해주세요.";
pub const SIGN_IN_SUCCESS: &str = "로그인 성공!";
pub const SIGN_IN_FAILED: &str = "로그인에 실패했습니다.";
pub const ALREADY_REGISTERED: &str = "이미 가입된 계정입니다.";

pub const INVALID_NAME: &str = "이름은 2~8자의 한글, 영문, 숫자만 사용할 수 있습니다.";
pub const INVALID_EMAIL: &str = "유효한 이메일 형식을 입력해주십시오.";
pub const INVALID_PASSWORD: &str = "비밀번호는 영어 대소문자와 숫자를 포함해야 합니다.";
pub const PASSWORD_MISMATCH: &str = "비밀번호가 일치하지 않습니다.";

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::InvalidName => INVALID_NAME,
            ValidationError::InvalidEmail => INVALID_EMAIL,
            ValidationError::InvalidPassword => INVALID_PASSWORD,
            ValidationError::PasswordMismatch => PASSWORD_MISMATCH,
        }
    }
}

impl IdentityError {
    /// Message shown for a failed sign-up.
    ///
    /// Only "already registered" gets its own wording; anything else from
    /// the provider is shown as the provider worded it.
    pub fn sign_up_message(&self) -> String {
        match self {
            IdentityError::Validation(e) => e.user_message().to_string(),
            IdentityError::AlreadyRegistered => ALREADY_REGISTERED.to_string(),
            IdentityError::Provider { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Every sign-in failure reads the same.
    pub fn sign_in_message(&self) -> String {
        match self {
            IdentityError::Validation(e) => e.user_message().to_string(),
            _ => SIGN_IN_FAILED.to_string(),
        }
    }
}
