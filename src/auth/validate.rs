use lazy_static::lazy_static;
use regex::Regex;

use super::dto::SignupRequest;
use crate::error::ApiError;

/// Special characters a password must draw from.
const PASSWORD_SPECIALS: &str = "!@#$%^&*";

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// At least 6 characters with one special character, one lowercase and one
/// uppercase letter.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 6
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
}

/// Fixed role vocabulary; anything else is rejected at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    CitizenJournalist,
    ProfessionalJournalist,
    Analyst,
    Reader,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::CitizenJournalist,
        Role::ProfessionalJournalist,
        Role::Analyst,
        Role::Reader,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::CitizenJournalist => "Citizen Journalist",
            Role::ProfessionalJournalist => "Professional Journalist",
            Role::Analyst => "Analyst",
            Role::Reader => "Reader",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

/// Checks a signup payload field by field; the first failing check wins.
pub fn validate_signup(req: &SignupRequest) -> Result<(), ApiError> {
    if !is_valid_email(&req.email) {
        return Err(ApiError::Validation("Valid email is required".into()));
    }
    if !is_strong_password(&req.password) {
        return Err(ApiError::Validation(
            "Password must be at least 6 characters, first letter should be capital and contain at least one special character".into(),
        ));
    }
    if req.name.is_empty() {
        return Err(ApiError::Validation("Username is required".into()));
    }
    if Role::parse(&req.role).is_none() {
        return Err(ApiError::Validation("Valid role is required".into()));
    }
    if req.location.is_empty() {
        return Err(ApiError::Validation("Location is required".into()));
    }
    Ok(())
}

/// Checks a password-change payload; the strength rule matches signup, only
/// the wording differs.
pub fn validate_password_change(current: &str, new: &str) -> Result<(), ApiError> {
    if current.is_empty() {
        return Err(ApiError::Validation("Current password is required".into()));
    }
    if !is_strong_password(new) {
        return Err(ApiError::Validation(
            "New password must be at least 6 characters and contain at least one special character and one uppercase letter".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, password: &str, name: &str, role: &str, location: &str) -> SignupRequest {
        SignupRequest {
            email: email.into(),
            password: password.into(),
            name: name.into(),
            role: role.into(),
            location: location.into(),
        }
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@news-site.org"));
        assert!(is_valid_email("reporter@mail.example.com"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("user@domain.toolong"));
        assert!(!is_valid_email("user @domain.com"));
    }

    #[test]
    fn password_strength() {
        assert!(is_strong_password("Abc123!"));
        assert!(is_strong_password("P@ssword"));
        assert!(!is_strong_password("Ab1!"));          // too short
        assert!(!is_strong_password("Abcdef1"));       // no special
        assert!(!is_strong_password("ABCDEF1!"));      // no lowercase
        assert!(!is_strong_password("abcdef1!"));      // no uppercase
        assert!(!is_strong_password(""));
    }

    #[test]
    fn role_vocabulary() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("Editor"), None);
        assert_eq!(Role::parse("reader"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn signup_first_failure_wins() {
        let err = validate_signup(&signup("bad", "Abc123!", "A", "Reader", "X")).unwrap_err();
        assert_eq!(err.to_string(), "Valid email is required");

        let err = validate_signup(&signup("a@b.co", "weak", "A", "Reader", "X")).unwrap_err();
        assert!(err.to_string().starts_with("Password must be at least 6 characters"));

        let err = validate_signup(&signup("a@b.co", "Abc123!", "", "Reader", "X")).unwrap_err();
        assert_eq!(err.to_string(), "Username is required");

        let err = validate_signup(&signup("a@b.co", "Abc123!", "A", "Editor", "X")).unwrap_err();
        assert_eq!(err.to_string(), "Valid role is required");

        let err = validate_signup(&signup("a@b.co", "Abc123!", "A", "Reader", "")).unwrap_err();
        assert_eq!(err.to_string(), "Location is required");

        assert!(validate_signup(&signup("a@b.co", "Abc123!", "A", "Reader", "X")).is_ok());
    }

    #[test]
    fn password_change_rules() {
        let err = validate_password_change("", "NewPass1!").unwrap_err();
        assert_eq!(err.to_string(), "Current password is required");

        let err = validate_password_change("OldPass1!", "weak").unwrap_err();
        assert!(err.to_string().starts_with("New password must be at least 6 characters"));

        assert!(validate_password_change("OldPass1!", "NewPass1!").is_ok());
    }
}
