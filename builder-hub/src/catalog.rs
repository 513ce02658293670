//! Static content catalog: one featured item per tab, a separately ranked
//! board list, and the sample posts the community feed starts with.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::discussions::Discussion;
use crate::projects::Project;
use crate::submissions::Submission;

/// Featured content record for a tab. Immutable static data, keyed by tab
/// id, read-only at runtime.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub tab_id: String,
    pub title: String,
    pub description: String,
    pub image_placeholder: String,
    pub base_vote_count: u64,
    pub base_comment_count: u64,
    pub author: String,
}

/// A ranked board entry with its own vote toggle, independent of the main
/// content item. Vote keys for these use the `board-<index>` scope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardEntry {
    pub title: String,
    pub author: String,
    pub base_vote_count: u64,
}

#[derive(Clone, Debug)]
pub struct ContentCatalog {
    items: BTreeMap<String, ContentItem>,
    board: Vec<BoardEntry>,
    sample_posts: Vec<Submission>,
    sample_projects: Vec<Project>,
    sample_discussions: Vec<Discussion>,
}

impl ContentCatalog {
    /// The tab the session starts on.
    pub const DEFAULT_TAB: &'static str = "feed";

    pub fn builtin() -> Self {
        let mut items = BTreeMap::new();
        for item in builtin_items() {
            items.insert(item.tab_id.clone(), item);
        }
        Self {
            items,
            board: builtin_board(),
            sample_posts: builtin_sample_posts(),
            sample_projects: builtin_sample_projects(),
            sample_discussions: builtin_sample_discussions(),
        }
    }

    pub fn get(&self, tab_id: &str) -> Option<&ContentItem> {
        self.items.get(tab_id)
    }

    pub fn contains(&self, tab_id: &str) -> bool {
        self.items.contains_key(tab_id)
    }

    pub fn tab_ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn board(&self) -> &[BoardEntry] {
        &self.board
    }

    pub fn sample_posts(&self) -> &[Submission] {
        &self.sample_posts
    }

    pub fn sample_projects(&self) -> &[Project] {
        &self.sample_projects
    }

    pub fn sample_discussions(&self) -> &[Discussion] {
        &self.sample_discussions
    }
}

fn builtin_items() -> Vec<ContentItem> {
    vec![
        ContentItem {
            tab_id: "feed".to_string(),
            title: "Just launched my first SaaS product!".to_string(),
            description: "After 6 months of development, I finally launched my project management tool. Looking for feedback!"
                .to_string(),
            image_placeholder: "feed-hero".to_string(),
            base_vote_count: 12,
            base_comment_count: 5,
            author: "Sarah Chen".to_string(),
        },
        ContentItem {
            tab_id: "projects".to_string(),
            title: "TaskFlow - Project Management".to_string(),
            description: "A simple, intuitive project management tool for small teams".to_string(),
            image_placeholder: "projects-hero".to_string(),
            base_vote_count: 9,
            base_comment_count: 3,
            author: "Sarah Chen".to_string(),
        },
        ContentItem {
            tab_id: "discussions".to_string(),
            title: "Best practices for user onboarding?".to_string(),
            description: "I'm working on improving the onboarding flow for my app. What are some proven strategies?".to_string(),
            image_placeholder: "discussions-hero".to_string(),
            base_vote_count: 8,
            base_comment_count: 8,
            author: "Emily Watson".to_string(),
        },
        ContentItem {
            tab_id: "resources".to_string(),
            title: "Resources coming soon".to_string(),
            description: "We're curating the best learning resources for builders!".to_string(),
            image_placeholder: "resources-hero".to_string(),
            base_vote_count: 0,
            base_comment_count: 0,
            author: "Builder Hub".to_string(),
        },
        ContentItem {
            tab_id: "jobs".to_string(),
            title: "Job board launching soon".to_string(),
            description: "Connect with opportunities in the builder community!".to_string(),
            image_placeholder: "jobs-hero".to_string(),
            base_vote_count: 0,
            base_comment_count: 0,
            author: "Builder Hub".to_string(),
        },
    ]
}

fn builtin_board() -> Vec<BoardEntry> {
    vec![
        BoardEntry { title: "TaskFlow - Project Management".to_string(), author: "Sarah Chen".to_string(), base_vote_count: 21 },
        BoardEntry { title: "AI Code Assistant".to_string(), author: "Alex Kim".to_string(), base_vote_count: 17 },
        BoardEntry {
            title: "React vs Vue for new projects in 2025?".to_string(),
            author: "David Park".to_string(),
            base_vote_count: 15,
        },
    ]
}

// Timestamps are fixed so the seeded feed is stable across runs; the web
// client generated them relative to page load instead.
fn builtin_sample_posts() -> Vec<Submission> {
    vec![
        Submission {
            id: "sample-1".to_string(),
            title: "Just launched my first SaaS product!".to_string(),
            content: "After 6 months of development, I finally launched my project management tool. Looking for feedback!"
                .to_string(),
            category: "achievement".to_string(),
            author: "Sarah Chen".to_string(),
            created_at: 1_735_000_000_000,
            base_vote_count: 12,
            base_comment_count: 5,
        },
        Submission {
            id: "sample-2".to_string(),
            title: "Need advice on scaling my team".to_string(),
            content: "My startup is growing and I need to hire my first developer. Any tips on what to look for?".to_string(),
            category: "question".to_string(),
            author: "Mike Rodriguez".to_string(),
            created_at: 1_734_900_000_000,
            base_vote_count: 8,
            base_comment_count: 12,
        },
    ]
}

fn builtin_sample_projects() -> Vec<Project> {
    vec![
        Project {
            id: "sample-project-1".to_string(),
            name: "TaskFlow - Project Management".to_string(),
            description: "A simple, intuitive project management tool for small teams".to_string(),
            status: "completed".to_string(),
            url: "https://taskflow.example.com".to_string(),
            github: "https://github.com/sarahchen/taskflow".to_string(),
            author: "Sarah Chen".to_string(),
            created_at: 1_734_950_000_000,
        },
        Project {
            id: "sample-project-2".to_string(),
            name: "AI Code Assistant".to_string(),
            description: "VSCode extension that helps developers write better code using AI".to_string(),
            status: "in-progress".to_string(),
            url: String::new(),
            github: "https://github.com/alexkim/ai-assistant".to_string(),
            author: "Alex Kim".to_string(),
            created_at: 1_734_850_000_000,
        },
    ]
}

fn builtin_sample_discussions() -> Vec<Discussion> {
    vec![
        Discussion {
            id: "sample-discussion-1".to_string(),
            title: "Best practices for user onboarding?".to_string(),
            content: "I'm working on improving the onboarding flow for my app. What are some proven strategies?".to_string(),
            category: "general".to_string(),
            author: "Emily Watson".to_string(),
            replies: 8,
            created_at: 1_734_990_000_000,
        },
        Discussion {
            id: "sample-discussion-2".to_string(),
            title: "React vs Vue for new projects in 2025?".to_string(),
            content: "Starting a new project and debating between React and Vue. What are your thoughts?".to_string(),
            category: "technical".to_string(),
            author: "David Park".to_string(),
            replies: 15,
            created_at: 1_734_880_000_000,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_tabs() {
        let catalog = ContentCatalog::builtin();
        for tab in ["feed", "projects", "discussions", "resources", "jobs"] {
            let item = catalog.get(tab).expect("builtin tab should exist");
            assert_eq!(item.tab_id, tab);
        }
        assert!(catalog.contains(ContentCatalog::DEFAULT_TAB));
        assert!(!catalog.contains("crossword"));
    }

    #[test]
    fn test_sample_posts_are_newest_first() {
        let catalog = ContentCatalog::builtin();
        let posts = catalog.sample_posts();
        assert!(posts.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_sample_projects_and_discussions_are_newest_first() {
        let catalog = ContentCatalog::builtin();
        assert!(catalog.sample_projects().windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert!(catalog.sample_discussions().windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(catalog.sample_projects()[0].status, "completed");
        assert_eq!(catalog.sample_discussions()[1].replies, 15);
    }
}
