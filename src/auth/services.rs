use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::SignupRequest;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Field checks for sign-up; returns the first failing rule's message.
pub(crate) fn validate_signup(req: &SignupRequest) -> Result<(), String> {
    if req.first_name.trim().len() < 2 {
        return Err("First Name must be a minimum of 2 characters".into());
    }
    if req.last_name.trim().len() < 2 {
        return Err("Last Name must be a minimum of 2 characters".into());
    }
    if !is_valid_email(req.email.trim()) {
        return Err("Please enter a valid email".into());
    }
    // both password fields are compared and stored trimmed
    if req.password.trim().len() < 6 {
        return Err("Password must be a minimum of 6 characters".into());
    }
    if req.confirm_password.trim() != req.password.trim() {
        return Err("Passwords do not match".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> SignupRequest {
        SignupRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[test]
    fn accepts_valid_signup() {
        assert!(validate_signup(&valid_request()).is_ok());
    }

    #[test]
    fn rejects_short_first_name() {
        let mut req = valid_request();
        req.first_name = "A".into();
        assert_eq!(
            validate_signup(&req).unwrap_err(),
            "First Name must be a minimum of 2 characters"
        );
    }

    #[test]
    fn rejects_invalid_email() {
        let mut req = valid_request();
        req.email = "not-an-email".into();
        assert_eq!(validate_signup(&req).unwrap_err(), "Please enter a valid email");
    }

    #[test]
    fn rejects_short_password() {
        let mut req = valid_request();
        req.password = "abc".into();
        req.confirm_password = "abc".into();
        assert_eq!(
            validate_signup(&req).unwrap_err(),
            "Password must be a minimum of 6 characters"
        );
    }

    #[test]
    fn trims_password_before_length_check() {
        let mut req = valid_request();
        req.password = "  abc  ".into();
        req.confirm_password = "  abc  ".into();
        assert_eq!(
            validate_signup(&req).unwrap_err(),
            "Password must be a minimum of 6 characters"
        );
    }

    #[test]
    fn compares_passwords_trimmed() {
        let mut req = valid_request();
        req.password = " secret1 ".into();
        req.confirm_password = "secret1".into();
        assert!(validate_signup(&req).is_ok());
    }

    #[test]
    fn rejects_password_mismatch() {
        let mut req = valid_request();
        req.confirm_password = "different".into();
        assert_eq!(validate_signup(&req).unwrap_err(), "Passwords do not match");
    }

    #[test]
    fn email_regex_basics() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
    }
}
