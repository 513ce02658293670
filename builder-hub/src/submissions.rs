use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A member-submitted post. Starts with zero counts and is eligible for the
/// "newest" listing immediately, most-recent-first.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub created_at: u64,
    pub base_vote_count: u64,
    pub base_comment_count: u64,
}

/// Merge member submissions with the seeded sample posts, most recent first.
/// Both inputs are already newest-first, so this is a single ordered merge.
pub fn newest<'a>(submissions: &'a [Submission], samples: &'a [Submission]) -> Vec<&'a Submission> {
    submissions.iter().merge_by(samples.iter(), |a, b| a.created_at >= b.created_at).collect()
}
