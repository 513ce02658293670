//! Vote bookkeeping: a membership set of vote keys per session. The ledger
//! never stores counts; callers own the displayed number and the ledger
//! derives the next one.

use std::collections::HashSet;

/// Scope prefix for board entries, e.g. `board-0`.
pub const BOARD_SCOPE: &str = "board";

/// Item id of a tab's main content toggle, e.g. `feed-main`.
pub const MAIN_ITEM: &str = "main";

/// Composite key scoping a vote toggle to a specific item and context.
pub fn vote_key(scope: &str, item_id: &str) -> String {
    format!("{scope}-{item_id}")
}

#[derive(Clone, Debug, Default)]
pub struct VoteLedger {
    voted: HashSet<String>,
}

impl VoteLedger {
    /// Flips membership for `key`. Exactly one flip per call: returns
    /// `(true, count + 1)` when the vote was added, `(false, count - 1)`
    /// when it was removed.
    pub fn toggle(&mut self, key: &str, displayed_count: u64) -> (bool, u64) {
        if self.voted.remove(key) {
            (false, displayed_count.saturating_sub(1))
        } else {
            self.voted.insert(key.to_string());
            (true, displayed_count + 1)
        }
    }

    pub fn has_voted(&self, key: &str) -> bool {
        self.voted.contains(key)
    }

    /// Drops a key without touching any count. Used when a tab switch resets
    /// the toggle's display state to "not voted".
    pub fn reset(&mut self, key: &str) {
        self.voted.remove(key);
    }

    pub fn len(&self) -> usize {
        self.voted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voted.is_empty()
    }
}
