use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Post, Principal};

/// Aggregate view over every stored post. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_posts: usize,
    pub unique_authors: usize,
    pub most_liked_post: Post,
    pub most_disliked_post: Post,
}

impl Statistics {
    /// Returns `None` for an empty slice.
    pub fn compute(posts: &[Post]) -> Option<Self> {
        Some(Self {
            total_posts: posts.len(),
            unique_authors: unique_authors(posts),
            most_liked_post: most_liked(posts)?.clone(),
            most_disliked_post: most_disliked(posts)?.clone(),
        })
    }
}

pub fn unique_authors(posts: &[Post]) -> usize {
    posts
        .iter()
        .map(|post| &post.author)
        .collect::<HashSet<&Principal>>()
        .len()
}

/// Post with the most likes; the earliest one wins a tie.
pub fn most_liked(posts: &[Post]) -> Option<&Post> {
    max_by_first(posts, |post| post.likes())
}

/// Post with the most dislikes; the earliest one wins a tie.
pub fn most_disliked(posts: &[Post]) -> Option<&Post> {
    max_by_first(posts, |post| post.dislikes())
}

// Iterator::max_by_key keeps the last maximum, so reduce by hand.
fn max_by_first(posts: &[Post], key: impl Fn(&Post) -> u64) -> Option<&Post> {
    posts
        .iter()
        .reduce(|best, post| if key(post) > key(best) { post } else { best })
}
