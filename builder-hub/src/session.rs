//! The session state machine. Owns the current tab, the signed-in user, the
//! vote ledger, the transient comment list, and the submissions feed; every
//! UI action runs through here to completion, single-threaded.

use log::{debug, info, warn};
use serde_json::json;

use crate::auth::SharedAuth;
use crate::catalog::{ContentCatalog, ContentItem};
use crate::comments::{self, Comment};
use crate::discussions::{self, Discussion};
use crate::error::HubError;
use crate::event::{EventMetadata, EventOutcome, HubEvent};
use crate::notify::{Severity, SharedNotifier};
use crate::projects::{self, Project};
use crate::storage::{keys, Store};
use crate::submissions::{self, Submission};
use crate::user::User;
use crate::utils::{format_relative, generate_id};
use crate::votes::{vote_key, VoteLedger, MAIN_ITEM};

pub struct HubSession {
    catalog: ContentCatalog,
    store: Store,
    auth: SharedAuth,
    notifier: SharedNotifier,
    current_tab: String,
    current_user: Option<User>,
    votes: VoteLedger,
    comments: Vec<Comment>,
    submissions: Vec<Submission>,
    projects: Vec<Project>,
    discussions: Vec<Discussion>,
    last_comment_id: u64,
}

impl HubSession {
    /// Builds a session and restores what the store remembers: the signed-in
    /// user (when the remember-me flag is set) and the member-added content
    /// lists. Storage failures degrade to a fresh in-memory session.
    pub fn new(catalog: ContentCatalog, store: Store, auth: SharedAuth, notifier: SharedNotifier) -> Self {
        let mut session = Self {
            catalog,
            store,
            auth,
            notifier,
            current_tab: ContentCatalog::DEFAULT_TAB.to_string(),
            current_user: None,
            votes: VoteLedger::default(),
            comments: Vec::new(),
            submissions: Vec::new(),
            projects: Vec::new(),
            discussions: Vec::new(),
            last_comment_id: 0,
        };
        session.restore();
        session
    }

    fn restore(&mut self) {
        match self.store.get(keys::REMEMBER_ME) {
            Ok(Some(flag)) if flag.as_bool() == Some(true) => match self.store.get(keys::CURRENT_USER) {
                Ok(Some(blob)) => match serde_json::from_value::<User>(blob) {
                    Ok(user) => {
                        info!("[HubSession] restored session for {}", user.name);
                        self.current_user = Some(user);
                    }
                    Err(e) => warn!("[HubSession] stored user is malformed: {e}"),
                },
                Ok(None) => {}
                Err(e) => warn!("[HubSession] could not read stored user: {e}"),
            },
            Ok(_) => {}
            Err(e) => warn!("[HubSession] could not read remember-me flag: {e}"),
        }

        self.submissions = restore_list(&self.store, keys::SUBMISSIONS, "submissions");
        self.projects = restore_list(&self.store, keys::PROJECTS, "projects");
        self.discussions = restore_list(&self.store, keys::DISCUSSIONS, "discussions");
    }

    // ===== Tab controller =====

    /// Switches the active tab. Unknown tabs are a silent no-op. Switching
    /// clears the transient comment list and resets the new tab's main vote
    /// toggle to "not voted".
    pub fn switch_tab(&mut self, tab_id: &str) {
        if !self.catalog.contains(tab_id) {
            debug!("[HubSession] ignoring unknown tab {tab_id:?}");
            return;
        }
        self.current_tab = tab_id.to_string();
        self.comments.clear();
        self.votes.reset(&vote_key(tab_id, MAIN_ITEM));
        info!("[HubSession] switched to tab {tab_id}");
    }

    // ===== Vote ledger =====

    /// Toggles the (scope, item) vote for the signed-in user and returns
    /// `(now_voted, displayed_count ± 1)`. The session never stores counts;
    /// the caller passes the currently displayed one.
    pub fn toggle_vote(&mut self, scope: &str, item_id: &str, displayed_count: u64) -> Result<(bool, u64), HubError> {
        if self.current_user.is_none() {
            return Err(self.reject_anonymous());
        }
        let key = vote_key(scope, item_id);
        let (voted, count) = self.votes.toggle(&key, displayed_count);
        if let Some(user) = self.current_user.as_mut() {
            if voted {
                user.vote_count += 1;
            } else {
                user.vote_count = user.vote_count.saturating_sub(1);
            }
        }
        self.persist_user();
        info!("[HubSession] vote {key} -> {count} (voted: {voted})");
        self.notifier.notify(Severity::Success, if voted { "Vote recorded!" } else { "Vote removed" });
        Ok((voted, count))
    }

    // ===== Comment log =====

    /// Appends a comment to the active tab's transient list.
    pub fn post_comment(&mut self, text: &str, meta: &EventMetadata) -> Result<u64, HubError> {
        if let Err(e) = comments::validate_text(text) {
            return Err(self.reject(e));
        }
        let author = match &self.current_user {
            Some(user) => user.name.clone(),
            None => return Err(self.reject_anonymous()),
        };

        // Wall-clock id, bumped so two events in the same millisecond still
        // get distinct ids.
        let id = meta.timestamp_ms.max(self.last_comment_id + 1);
        self.last_comment_id = id;

        self.comments.push(Comment { id, text: text.trim().to_string(), author, created_at: meta.timestamp_ms });
        if let Some(user) = self.current_user.as_mut() {
            user.comment_count += 1;
        }
        self.persist_user();
        info!("[HubSession] comment {id} added on tab {}", self.current_tab);
        self.notifier.notify(Severity::Success, "Comment posted!");
        Ok(id)
    }

    // ===== Submission intake =====

    /// Accepts a new post with zero initial counts and prepends it to the
    /// newest listing.
    pub fn submit_post(&mut self, title: &str, content: &str, category: &str, meta: &EventMetadata) -> Result<String, HubError> {
        let author = match &self.current_user {
            Some(user) => user.name.clone(),
            None => return Err(self.reject_anonymous()),
        };
        if title.trim().is_empty() {
            return Err(self.reject(HubError::MissingTitle));
        }
        if content.trim().is_empty() {
            return Err(self.reject(HubError::MissingRequiredFields));
        }

        let id = generate_id(meta.timestamp_ms);
        let submission = Submission {
            id: id.clone(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            category: category.to_string(),
            author,
            created_at: meta.timestamp_ms,
            base_vote_count: 0,
            base_comment_count: 0,
        };
        self.submissions.insert(0, submission);
        if let Some(user) = self.current_user.as_mut() {
            user.post_count += 1;
        }
        self.persist_user();
        self.persist_blob(keys::SUBMISSIONS, &self.submissions, "submissions");
        info!("[HubSession] submission {id} accepted");
        self.notifier.notify(Severity::Success, "Post created successfully!");
        Ok(id)
    }

    // ===== Project intake =====

    /// Adds a project to the projects tab listing. Name and description are
    /// required; status, url, and github pass through as given.
    pub fn add_project(
        &mut self,
        name: &str,
        description: &str,
        status: &str,
        url: &str,
        github: &str,
        meta: &EventMetadata,
    ) -> Result<String, HubError> {
        let author = match &self.current_user {
            Some(user) => user.name.clone(),
            None => return Err(self.reject_anonymous()),
        };
        if name.trim().is_empty() || description.trim().is_empty() {
            return Err(self.reject(HubError::MissingRequiredFields));
        }

        let id = generate_id(meta.timestamp_ms);
        let project = Project {
            id: id.clone(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            status: status.to_string(),
            url: url.to_string(),
            github: github.to_string(),
            author,
            created_at: meta.timestamp_ms,
        };
        self.projects.insert(0, project);
        self.persist_blob(keys::PROJECTS, &self.projects, "projects");
        info!("[HubSession] project {id} added");
        self.notifier.notify(Severity::Success, "Project added successfully!");
        Ok(id)
    }

    // ===== Discussion intake =====

    /// Starts a discussion thread with a zero reply count and prepends it to
    /// the discussions listing.
    pub fn start_discussion(&mut self, title: &str, content: &str, category: &str, meta: &EventMetadata) -> Result<String, HubError> {
        let author = match &self.current_user {
            Some(user) => user.name.clone(),
            None => return Err(self.reject_anonymous()),
        };
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(self.reject(HubError::MissingFields));
        }

        let id = generate_id(meta.timestamp_ms);
        let discussion = Discussion {
            id: id.clone(),
            title: title.trim().to_string(),
            content: content.trim().to_string(),
            category: category.to_string(),
            author,
            replies: 0,
            created_at: meta.timestamp_ms,
        };
        self.discussions.insert(0, discussion);
        self.persist_blob(keys::DISCUSSIONS, &self.discussions, "discussions");
        info!("[HubSession] discussion {id} started");
        self.notifier.notify(Severity::Success, "Discussion started successfully!");
        Ok(id)
    }

    // ===== Auth =====

    pub fn login(&mut self, email: &str, password: &str, meta: &EventMetadata) -> Result<(), HubError> {
        let user = match self.auth.login(email, password, meta.timestamp_ms) {
            Ok(user) => user,
            Err(e) => return Err(self.reject(e)),
        };
        info!("[HubSession] {} logged in", user.name);
        self.current_user = Some(user);
        self.persist_user();
        self.set_remember_me();
        self.notifier.notify(Severity::Success, "Welcome back!");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
        agreed_terms: bool,
        meta: &EventMetadata,
    ) -> Result<(), HubError> {
        let user = match self.auth.signup(name, email, password, confirm_password, agreed_terms, meta.timestamp_ms) {
            Ok(user) => user,
            Err(e) => return Err(self.reject(e)),
        };
        info!("[HubSession] {} signed up", user.name);
        self.current_user = Some(user);
        self.persist_user();
        self.set_remember_me();
        self.notifier.notify(Severity::Success, "Account created successfully! Welcome to Builder Hub!");
        Ok(())
    }

    /// Unconditional Authenticated -> Anonymous; clears the persisted
    /// session best-effort.
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!("[HubSession] {} logged out", user.name);
        }
        for key in [keys::CURRENT_USER, keys::REMEMBER_ME] {
            if let Err(e) = self.store.remove(key) {
                warn!("[HubSession] could not clear {key}: {e}");
            }
        }
        self.notifier.notify(Severity::Success, "Logged out successfully");
    }

    // ===== Event dispatch =====

    /// Runs one input event to completion.
    pub fn handle(&mut self, event: &HubEvent, meta: &EventMetadata) -> Result<EventOutcome, HubError> {
        debug!("[HubSession] handling {}", event.event_type());
        match event {
            HubEvent::SwitchTab { tab_id } => {
                let known = self.catalog.contains(tab_id);
                self.switch_tab(tab_id);
                if known {
                    Ok(EventOutcome::TabSwitched { tab_id: tab_id.clone() })
                } else {
                    Ok(EventOutcome::Ignored)
                }
            }
            HubEvent::ToggleVote { scope, item_id, displayed_count } => {
                let (voted, count) = self.toggle_vote(scope, item_id, *displayed_count)?;
                Ok(EventOutcome::VoteToggled { key: vote_key(scope, item_id), voted, count })
            }
            HubEvent::PostComment { text } => {
                let id = self.post_comment(text, meta)?;
                Ok(EventOutcome::CommentPosted { id })
            }
            HubEvent::SubmitPost { title, content, category } => {
                let id = self.submit_post(title, content, category, meta)?;
                Ok(EventOutcome::PostSubmitted { id })
            }
            HubEvent::AddProject { name, description, status, url, github } => {
                let id = self.add_project(name, description, status, url, github, meta)?;
                Ok(EventOutcome::ProjectAdded { id })
            }
            HubEvent::StartDiscussion { title, content, category } => {
                let id = self.start_discussion(title, content, category, meta)?;
                Ok(EventOutcome::DiscussionStarted { id })
            }
            HubEvent::Login { email, password } => {
                self.login(email, password, meta)?;
                Ok(EventOutcome::LoggedIn { name: self.user_name() })
            }
            HubEvent::Signup { name, email, password, confirm_password, agreed_terms } => {
                self.signup(name, email, password, confirm_password, *agreed_terms, meta)?;
                Ok(EventOutcome::SignedUp { name: self.user_name() })
            }
            HubEvent::Logout => {
                self.logout();
                Ok(EventOutcome::LoggedOut)
            }
        }
    }

    // ===== Reads =====

    pub fn current_tab(&self) -> &str {
        &self.current_tab
    }

    pub fn current_content(&self) -> Option<&ContentItem> {
        self.catalog.get(&self.current_tab)
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn has_voted(&self, key: &str) -> bool {
        self.votes.has_voted(key)
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Member submissions merged with the seeded sample posts, newest first.
    pub fn newest(&self) -> Vec<&Submission> {
        submissions::newest(&self.submissions, self.catalog.sample_posts())
    }

    /// Member projects merged with the seeded samples, newest first.
    pub fn projects(&self) -> Vec<&Project> {
        projects::newest(&self.projects, self.catalog.sample_projects())
    }

    /// Member discussions merged with the seeded samples, newest first.
    pub fn discussions(&self) -> Vec<&Discussion> {
        discussions::newest(&self.discussions, self.catalog.sample_discussions())
    }

    /// Current state for external renderers.
    pub fn poll(&self) -> SessionSnapshot {
        SessionSnapshot {
            tab_id: self.current_tab.clone(),
            content: self.current_content().cloned(),
            main_voted: self.votes.has_voted(&vote_key(&self.current_tab, MAIN_ITEM)),
            comments: self.comments.clone(),
            newest: self.newest().into_iter().cloned().collect(),
            user: self.current_user.clone(),
            votes_cast: self.votes.len(),
        }
    }

    // ===== Internals =====

    fn user_name(&self) -> String {
        self.current_user.as_ref().map(|u| u.name.clone()).unwrap_or_default()
    }

    fn reject(&self, err: HubError) -> HubError {
        self.notifier.notify(Severity::Error, &err.to_string());
        err
    }

    fn reject_anonymous(&self) -> HubError {
        let err = HubError::AuthRequired;
        self.notifier.notify(Severity::Error, &err.to_string());
        self.notifier.request_login_prompt();
        err
    }

    fn persist_user(&self) {
        let Some(user) = &self.current_user else { return };
        self.persist_blob(keys::CURRENT_USER, user, "user");
    }

    fn persist_blob<T: serde::Serialize>(&self, key: &str, value: &T, what: &str) {
        match serde_json::to_value(value) {
            Ok(blob) => {
                if let Err(e) = self.store.set(key, blob) {
                    warn!("[HubSession] could not persist {what}: {e}");
                }
            }
            Err(e) => warn!("[HubSession] could not serialize {what}: {e}"),
        }
    }

    fn set_remember_me(&self) {
        if let Err(e) = self.store.set(keys::REMEMBER_ME, json!(true)) {
            warn!("[HubSession] could not persist remember-me flag: {e}");
        }
    }
}

fn restore_list<T: serde::de::DeserializeOwned>(store: &Store, key: &str, what: &str) -> Vec<T> {
    match store.get(key) {
        Ok(Some(blob)) => match serde_json::from_value(blob) {
            Ok(list) => list,
            Err(e) => {
                warn!("[HubSession] stored {what} are malformed: {e}");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("[HubSession] could not read stored {what}: {e}");
            Vec::new()
        }
    }
}

/// Point-in-time view for renderers and the terminal client.
#[derive(Clone, Debug)]
pub struct SessionSnapshot {
    pub tab_id: String,
    pub content: Option<ContentItem>,
    pub main_voted: bool,
    pub comments: Vec<Comment>,
    pub newest: Vec<Submission>,
    pub user: Option<User>,
    pub votes_cast: usize,
}

impl SessionSnapshot {
    pub fn print(&self, now_ms: u64) {
        println!("=== Builder Hub ===");
        match &self.content {
            Some(item) => {
                let toggle = if self.main_voted { " [voted]" } else { "" };
                println!("[{}] {} — by {}", self.tab_id, item.title, item.author);
                println!("    {}", item.description);
                println!("    votes: {}{}  comments: {}", item.base_vote_count + u64::from(self.main_voted), toggle, item.base_comment_count);
            }
            None => println!("[{}] (no content)", self.tab_id),
        }

        if self.comments.is_empty() {
            println!("No comments yet. Be the first to comment!");
        } else {
            for comment in &self.comments {
                println!("[{}] {}: {}", format_relative(comment.created_at, now_ms), comment.author, comment.text);
            }
        }

        println!("--- newest posts ---");
        for submission in &self.newest {
            println!("[{}] {} — {}", format_relative(submission.created_at, now_ms), submission.author, submission.title);
        }

        match &self.user {
            Some(user) => println!(
                "Signed in as {} ({} posts, {} votes, {} comments)",
                user.name, user.post_count, user.vote_count, user.comment_count
            ),
            None => println!("Browsing anonymously — log in to vote, comment, or post."),
        }
        println!("===================");
    }
}
