use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use builder_hub::storage::MemStore;
use builder_hub::{ContentCatalog, HubSession, KvStore, MockAuth, Notifier, Severity, Store, StoreError};
use serde_json::Value;

/// Records every toast and login prompt so flows can assert on what the
/// renderer would have shown.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(Severity, String)>>,
    prompts: AtomicUsize,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.lock().expect("notifier lock").clone()
    }

    pub fn last_error(&self) -> Option<String> {
        self.messages().into_iter().rev().find(|(s, _)| *s == Severity::Error).map(|(_, m)| m)
    }

    pub fn login_prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages.lock().expect("notifier lock").push((severity, message.to_string()));
    }

    fn request_login_prompt(&self) {
        self.prompts.fetch_add(1, Ordering::SeqCst);
    }
}

/// A store whose every access fails, for exercising the degraded
/// "persistence skipped, session continues in-memory" path.
#[derive(Default)]
pub struct FailingStore;

impl KvStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::NoBackend)
    }

    fn set(&self, _key: &str, _value: Value) -> Result<(), StoreError> {
        Err(StoreError::NoBackend)
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::NoBackend)
    }
}

pub fn mem_store() -> Arc<MemStore> {
    Arc::new(MemStore::default())
}

/// Session wired to the given store plus a recording notifier.
pub fn session_with_store(store: Store) -> (HubSession, Arc<RecordingNotifier>) {
    let notifier = RecordingNotifier::new();
    let session = HubSession::new(ContentCatalog::builtin(), store, Arc::new(MockAuth), notifier.clone());
    (session, notifier)
}

pub fn test_session() -> (HubSession, Arc<RecordingNotifier>) {
    session_with_store(mem_store())
}
