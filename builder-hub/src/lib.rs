//! Builder Hub session core: the headless state machine behind a
//! single-page community board. Tabs select a catalog content record, votes
//! are a membership toggle per (scope, item) key, comments live on the
//! active tab, submissions feed the newest listing, and every gated action
//! requires a signed-in member. Rendering, persistence, and notification
//! surfaces are external collaborators behind traits.

pub mod auth;
pub mod catalog;
pub mod comments;
pub mod discussions;
pub mod error;
pub mod event;
pub mod notify;
pub mod projects;
pub mod session;
pub mod storage;
pub mod submissions;
pub mod user;
pub mod utils;
pub mod votes;

pub use auth::{AuthProvider, MockAuth, SharedAuth};
pub use catalog::{BoardEntry, ContentCatalog, ContentItem};
pub use comments::Comment;
pub use discussions::Discussion;
pub use error::{ErrorKind, HubError, HubResult};
pub use event::{EventMetadata, EventOutcome, HubEvent};
pub use notify::{LogNotifier, Notifier, NullNotifier, Severity, SharedNotifier};
pub use projects::{format_status, Project};
pub use session::{HubSession, SessionSnapshot};
pub use storage::{new_store, KvStore, Store, StoreError};
pub use submissions::Submission;
pub use user::User;
pub use votes::{vote_key, VoteLedger, BOARD_SCOPE, MAIN_ITEM};
