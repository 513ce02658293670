use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A discussion thread on the discussions tab. Replies stay a display
/// count; there is no nested reply model.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub replies: u64,
    pub created_at: u64,
}

/// Merge member discussions with the seeded samples, most recent first.
pub fn newest<'a>(discussions: &'a [Discussion], samples: &'a [Discussion]) -> Vec<&'a Discussion> {
    discussions.iter().merge_by(samples.iter(), |a, b| a.created_at >= b.created_at).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discussion(id: &str, created_at: u64) -> Discussion {
        Discussion {
            id: id.to_string(),
            title: format!("thread {id}"),
            content: "body".to_string(),
            category: "general".to_string(),
            author: "tester".to_string(),
            replies: 0,
            created_at,
        }
    }

    #[test]
    fn test_newest_merges_most_recent_first() {
        let started = vec![discussion("d2", 400), discussion("d1", 200)];
        let samples = vec![discussion("a", 300), discussion("b", 100)];

        let listing = newest(&started, &samples);
        let ids: Vec<&str> = listing.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d2", "a", "d1", "b"]);
    }
}
