//! Renderer-facing seam. The view layer (toasts, modals) stays external;
//! the session only reports what happened and with what severity.

use log::{info, warn};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

pub type SharedNotifier = Arc<dyn Notifier + Send + Sync + 'static>;

pub trait Notifier {
    /// Transient toast: the web client showed these for ~3 seconds.
    fn notify(&self, severity: Severity, message: &str);

    /// A gated action was attempted while anonymous; the renderer should
    /// present the login prompt.
    fn request_login_prompt(&self) {}
}

/// Routes notifications to the log. Good enough for headless runs.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Success => info!("[Notify] {message}"),
            Severity::Error => warn!("[Notify] {message}"),
        }
    }

    fn request_login_prompt(&self) {
        info!("[Notify] login prompt requested");
    }
}

/// Discards everything. Used by tests that only assert on state.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _severity: Severity, _message: &str) {}
}
