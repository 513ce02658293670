//! Command/handler seam, decoupled from any UI toolkit. Every user-visible
//! action is an event; the session consumes events and reports outcomes, so
//! the contracts stay testable headlessly.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock context for an event. Handlers never read the clock
/// themselves, which keeps runs deterministic under test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventMetadata {
    pub timestamp_ms: u64,
}

impl EventMetadata {
    pub fn now() -> Self {
        let timestamp_ms = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or_default();
        Self { timestamp_ms }
    }

    pub fn at(timestamp_ms: u64) -> Self {
        Self { timestamp_ms }
    }
}

/// Discrete input events, one per user action.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HubEvent {
    SwitchTab { tab_id: String },
    ToggleVote { scope: String, item_id: String, displayed_count: u64 },
    PostComment { text: String },
    SubmitPost { title: String, content: String, category: String },
    AddProject { name: String, description: String, status: String, url: String, github: String },
    StartDiscussion { title: String, content: String, category: String },
    Login { email: String, password: String },
    Signup { name: String, email: String, password: String, confirm_password: String, agreed_terms: bool },
    Logout,
}

impl HubEvent {
    /// Event name for logging/debugging.
    pub fn event_type(&self) -> &'static str {
        match self {
            HubEvent::SwitchTab { .. } => "SwitchTab",
            HubEvent::ToggleVote { .. } => "ToggleVote",
            HubEvent::PostComment { .. } => "PostComment",
            HubEvent::SubmitPost { .. } => "SubmitPost",
            HubEvent::AddProject { .. } => "AddProject",
            HubEvent::StartDiscussion { .. } => "StartDiscussion",
            HubEvent::Login { .. } => "Login",
            HubEvent::Signup { .. } => "Signup",
            HubEvent::Logout => "Logout",
        }
    }

    /// Whether the event is gated behind an authenticated user.
    pub fn requires_auth(&self) -> bool {
        match self {
            HubEvent::ToggleVote { .. }
            | HubEvent::PostComment { .. }
            | HubEvent::SubmitPost { .. }
            | HubEvent::AddProject { .. }
            | HubEvent::StartDiscussion { .. } => true,
            HubEvent::SwitchTab { .. } | HubEvent::Login { .. } | HubEvent::Signup { .. } | HubEvent::Logout => false,
        }
    }
}

/// The observable effect of a handled event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    TabSwitched { tab_id: String },
    /// Unknown tab: the switch is a silent no-op.
    Ignored,
    VoteToggled { key: String, voted: bool, count: u64 },
    CommentPosted { id: u64 },
    PostSubmitted { id: String },
    ProjectAdded { id: String },
    DiscussionStarted { id: String },
    LoggedIn { name: String },
    SignedUp { name: String },
    LoggedOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gated_events() {
        assert!(HubEvent::PostComment { text: "hi".to_string() }.requires_auth());
        assert!(HubEvent::ToggleVote { scope: "feed".to_string(), item_id: "main".to_string(), displayed_count: 0 }
            .requires_auth());
        assert!(HubEvent::AddProject {
            name: "n".to_string(),
            description: "d".to_string(),
            status: "idea".to_string(),
            url: String::new(),
            github: String::new(),
        }
        .requires_auth());
        assert!(HubEvent::StartDiscussion {
            title: "t".to_string(),
            content: "c".to_string(),
            category: "general".to_string(),
        }
        .requires_auth());
        assert!(!HubEvent::SwitchTab { tab_id: "feed".to_string() }.requires_auth());
        assert!(!HubEvent::Logout.requires_auth());
    }

    #[test]
    fn test_event_types() {
        assert_eq!(HubEvent::Logout.event_type(), "Logout");
        assert_eq!(HubEvent::SwitchTab { tab_id: "ai".to_string() }.event_type(), "SwitchTab");
    }

    #[test]
    fn test_event_serialization() {
        let event = HubEvent::Login { email: "a@b.com".to_string(), password: "abcdef".to_string() };
        let json = serde_json::to_string(&event).unwrap();
        let back: HubEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
