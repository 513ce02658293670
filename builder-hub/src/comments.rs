use serde::{Deserialize, Serialize};

use crate::error::HubError;

pub const MAX_COMMENT_LEN: usize = 2000;

/// A comment on the currently displayed content item. Owned by the active
/// tab's transient list; cleared whenever the tab changes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub text: String,
    pub author: String,
    pub created_at: u64,
}

/// Validate comment text before anything is appended.
pub fn validate_text(text: &str) -> Result<(), HubError> {
    if text.trim().is_empty() {
        return Err(HubError::EmptyComment);
    }
    if text.len() > MAX_COMMENT_LEN {
        return Err(HubError::CommentTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_rejected() {
        assert!(matches!(validate_text(""), Err(HubError::EmptyComment)));
        assert!(matches!(validate_text("   "), Err(HubError::EmptyComment)));
        assert!(matches!(validate_text("\t\n"), Err(HubError::EmptyComment)));
    }

    #[test]
    fn test_oversized_rejected() {
        let long = "x".repeat(MAX_COMMENT_LEN + 1);
        assert!(matches!(validate_text(&long), Err(HubError::CommentTooLong)));
        let just_fits = "x".repeat(MAX_COMMENT_LEN);
        assert!(validate_text(&just_fits).is_ok());
    }

    #[test]
    fn test_ordinary_text_accepted() {
        assert!(validate_text("nice!").is_ok());
    }
}
