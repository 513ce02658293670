use crate::storage::StoreError;

/// Session and command errors. Messages are user-facing: they are exactly
/// what the notifier surfaces as an error toast.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    // Form validation
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please agree to the terms to continue")]
    TermsNotAccepted,
    #[error("Please enter a title")]
    MissingTitle,
    #[error("Please fill in required fields")]
    MissingRequiredFields,

    // Comment validation
    #[error("Comment cannot be empty")]
    EmptyComment,
    #[error("Comment is too long (max {max} characters)", max = crate::comments::MAX_COMMENT_LEN)]
    CommentTooLong,

    // Gated actions attempted while anonymous
    #[error("Please log in to continue")]
    AuthRequired,

    // Key-value cache failures. Never escapes a session operation; callers
    // that open a backend directly may still see it.
    #[error("storage unavailable: {0}")]
    Storage(#[from] StoreError),
}

/// Coarse classification of a [`HubError`], matching the failure taxonomy:
/// validation aborts the operation with a toast, auth-required additionally
/// presents the login prompt, storage failures are logged and swallowed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    AuthRequired,
    Storage,
}

impl HubError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HubError::AuthRequired => ErrorKind::AuthRequired,
            HubError::Storage(_) => ErrorKind::Storage,
            _ => ErrorKind::Validation,
        }
    }
}

pub type HubResult<T> = Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(HubError::MissingFields.kind(), ErrorKind::Validation);
        assert_eq!(HubError::EmptyComment.kind(), ErrorKind::Validation);
        assert_eq!(HubError::AuthRequired.kind(), ErrorKind::AuthRequired);
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(HubError::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(HubError::AuthRequired.to_string(), "Please log in to continue");
    }
}
