use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A community project on the projects tab. Status carries the raw form
/// value ("in-progress", "completed"); `format_status` derives the display
/// label. Url and github are optional and stay empty when not given.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub github: String,
    pub author: String,
    pub created_at: u64,
}

/// Display label for a status value: "in-progress" -> "In Progress".
pub fn format_status(status: &str) -> String {
    status
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .join(" ")
}

/// Merge member projects with the seeded samples, most recent first. Both
/// inputs are already newest-first.
pub fn newest<'a>(projects: &'a [Project], samples: &'a [Project]) -> Vec<&'a Project> {
    projects.iter().merge_by(samples.iter(), |a, b| a.created_at >= b.created_at).collect()
}
