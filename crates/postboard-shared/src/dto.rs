//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body of a create or update request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: String,
}

/// Body of a comment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// Query string of a search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub author: String,
    pub content: String,
    pub created_at: String,
}

/// A post as seen by clients. Reactions are flattened into the two caller lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub image: String,
    pub created_at: String,
    pub updated_at: Option<String>,
    pub comments: Vec<CommentResponse>,
    pub likes: u64,
    pub dislikes: u64,
    pub liked: Vec<String>,
    pub disliked: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikesResponse {
    pub likes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DislikesResponse {
    pub dislikes: u64,
}

/// The caller's reaction to a post: `"liked"`, `"disliked"` or `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionResponse {
    pub reaction: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub total_posts: usize,
    pub unique_authors: usize,
    pub most_liked_post: PostResponse,
    pub most_disliked_post: PostResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorCountResponse {
    pub unique_authors: usize,
}
