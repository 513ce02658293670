use serde::{Deserialize, Serialize};

/// A signed-in member. Fabricated by the auth provider at login/signup,
/// owned by the session, destroyed on logout. Serialized with the same
/// camelCase keys the web client wrote to local storage.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub created_at: u64,
    pub post_count: u64,
    pub vote_count: u64,
    pub comment_count: u64,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub location: String,
}
