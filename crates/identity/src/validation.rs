//! Sign-up form validation.
//!
//! Rules run in a fixed order and the first failure wins: name, email,
//! password, confirmation.

use crate::error::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// 2 to 8 characters, each a Hangul syllable, ASCII letter or ASCII digit.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[가-힣a-zA-Z0-9]{2,8}$").expect("valid regex"));

/// ASCII letters and digits only, at least 6 of them.
static PASSWORD_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,}$").expect("valid regex"));

/// Fields of the sign-up form
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Fields of the sign-in form
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if NAME_RE.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName)
    }
}

/// Deliberately loose: the provider does the real address check.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if PASSWORD_CHARSET_RE.is_match(password) && has_letter && has_digit {
        Ok(())
    } else {
        Err(ValidationError::InvalidPassword)
    }
}

pub fn validate_sign_up(form: &SignUpForm) -> Result<(), ValidationError> {
    validate_name(&form.name)?;
    validate_email(&form.email)?;
    validate_password(&form.password)?;
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignUpForm {
        SignUpForm {
            name: "영화팬01".to_string(),
            email: "fan@example.com".to_string(),
            password: "movie123".to_string(),
            confirm_password: "movie123".to_string(),
        }
    }

    #[test]
    fn test_names() {
        for ok in ["ab", "홍길동", "Kim99", "가나다라마바사아", "a1"] {
            assert!(validate_name(ok).is_ok(), "{} should pass", ok);
        }
        for bad in ["a", "", "abcdefghi", "with space", "ㄱㄴ", "名前です", "kim!"] {
            assert_eq!(validate_name(bad), Err(ValidationError::InvalidName), "{}", bad);
        }
    }

    #[test]
    fn test_emails() {
        assert!(validate_email("a@b.c").is_ok());
        assert!(validate_email("a.b@c").is_ok());
        assert_eq!(validate_email("ab.c"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a@bc"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_passwords() {
        for ok in ["abc123", "ABCDEF1", "1a2b3c4d"] {
            assert!(validate_password(ok).is_ok(), "{} should pass", ok);
        }
        for bad in ["abc12", "abcdefg", "1234567", "abc 123", "abc-123", "비밀번호123"] {
            assert_eq!(
                validate_password(bad),
                Err(ValidationError::InvalidPassword),
                "{}",
                bad
            );
        }
    }

    #[test]
    fn test_sign_up_form_order() {
        assert!(validate_sign_up(&valid_form()).is_ok());

        let mut form = valid_form();
        form.name = "x".to_string();
        form.email = "bad".to_string();
        assert_eq!(validate_sign_up(&form), Err(ValidationError::InvalidName));

        let mut form = valid_form();
        form.email = "bad".to_string();
        form.password = "bad".to_string();
        assert_eq!(validate_sign_up(&form), Err(ValidationError::InvalidEmail));

        let mut form = valid_form();
        form.confirm_password = "movie124".to_string();
        assert_eq!(validate_sign_up(&form), Err(ValidationError::PasswordMismatch));
    }
}
