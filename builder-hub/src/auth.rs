//! Mock authentication. There is no credential backend: a valid form
//! fabricates a member record on the spot. The provider sits behind a trait
//! so a real backend could be substituted without touching the vote,
//! comment, or submission logic.

use log::info;
use std::sync::Arc;

use crate::error::HubError;
use crate::user::User;
use crate::utils::generate_id;

pub const MIN_PASSWORD_LEN: usize = 6;

pub type SharedAuth = Arc<dyn AuthProvider + Send + Sync + 'static>;

pub trait AuthProvider {
    fn login(&self, email: &str, password: &str, now_ms: u64) -> Result<User, HubError>;

    #[allow(clippy::too_many_arguments)]
    fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
        agreed_terms: bool,
        now_ms: u64,
    ) -> Result<User, HubError>;
}

/// Demo provider: validates the form, never checks credentials.
pub struct MockAuth;

impl AuthProvider for MockAuth {
    fn login(&self, email: &str, password: &str, now_ms: u64) -> Result<User, HubError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(HubError::MissingFields);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(HubError::PasswordTooShort);
        }

        // The display name is the email's local part, as the web client did.
        let name = email.split('@').next().unwrap_or(email).to_string();
        info!("[MockAuth] login accepted for {email}");
        Ok(new_user(&name, email, now_ms))
    }

    fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
        agreed_terms: bool,
        now_ms: u64,
    ) -> Result<User, HubError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() || confirm_password.is_empty() {
            return Err(HubError::MissingFields);
        }
        if password != confirm_password {
            return Err(HubError::PasswordMismatch);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(HubError::PasswordTooShort);
        }
        if !agreed_terms {
            return Err(HubError::TermsNotAccepted);
        }

        info!("[MockAuth] signup accepted for {email}");
        Ok(new_user(name.trim(), email, now_ms))
    }
}

fn new_user(name: &str, email: &str, now_ms: u64) -> User {
    User {
        id: generate_id(now_ms),
        name: name.to_string(),
        email: email.to_string(),
        avatar: avatar_url(name),
        created_at: now_ms,
        post_count: 0,
        vote_count: 0,
        comment_count: 0,
        bio: String::new(),
        website: String::new(),
        location: String::new(),
    }
}

fn avatar_url(name: &str) -> String {
    let encoded = name.replace(' ', "+");
    format!("https://ui-avatars.com/api/?name={encoded}&background=4299e1&color=fff")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000_000;

    #[test]
    fn test_login_fabricates_user() {
        let user = MockAuth.login("a@b.com", "abcdef", NOW).unwrap();
        assert_eq!(user.name, "a");
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.created_at, NOW);
        assert_eq!(user.post_count, 0);
        assert!(user.avatar.starts_with("https://ui-avatars.com/api/?name=a"));
    }

    #[test]
    fn test_login_validation() {
        assert!(matches!(MockAuth.login("", "abcdef", NOW), Err(HubError::MissingFields)));
        assert!(matches!(MockAuth.login("a@b.com", "", NOW), Err(HubError::MissingFields)));
        assert!(matches!(MockAuth.login("a@b.com", "abc", NOW), Err(HubError::PasswordTooShort)));
    }

    #[test]
    fn test_signup_password_mismatch() {
        let result = MockAuth.signup("A", "a@b.com", "abcdef", "abcdez", true, NOW);
        assert!(matches!(result, Err(HubError::PasswordMismatch)));
    }

    #[test]
    fn test_signup_requires_terms() {
        let result = MockAuth.signup("A", "a@b.com", "abcdef", "abcdef", false, NOW);
        assert!(matches!(result, Err(HubError::TermsNotAccepted)));
    }

    #[test]
    fn test_signup_accepts_valid_form() {
        let user = MockAuth.signup("Ada Lovelace", "ada@b.com", "abcdef", "abcdef", true, NOW).unwrap();
        assert_eq!(user.name, "Ada Lovelace");
        assert!(user.avatar.contains("Ada+Lovelace"));
    }
}
