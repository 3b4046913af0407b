use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Principal, Reaction};
use crate::error::DomainError;

/// Author-settable fields of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub content: String,
    pub image: String,
}

/// A comment attached to a post. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub author: Principal,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Post entity - a published piece of content with its comments and reactions.
///
/// Like and dislike counts are read off `reactions`, so a stored record can
/// never carry a count that disagrees with who reacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: Principal,
    pub title: String,
    pub content: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    comments: Vec<Comment>,
    reactions: BTreeMap<Principal, Reaction>,
}

impl Post {
    /// Create a new post with no comments and no reactions.
    pub fn new(id: String, author: Principal, payload: PostPayload, now: DateTime<Utc>) -> Self {
        Self {
            id,
            author,
            title: payload.title,
            content: payload.content,
            image: payload.image,
            created_at: now,
            updated_at: None,
            comments: Vec::new(),
            reactions: BTreeMap::new(),
        }
    }

    pub fn is_authored_by(&self, caller: &Principal) -> bool {
        &self.author == caller
    }

    /// Overwrite the mutable fields and stamp `updated_at`.
    pub fn apply(&mut self, payload: PostPayload, now: DateTime<Utc>) {
        self.title = payload.title;
        self.content = payload.content;
        self.image = payload.image;
        self.updated_at = Some(now);
    }

    pub fn add_comment(
        &mut self,
        author: Principal,
        content: String,
        now: DateTime<Utc>,
    ) -> Comment {
        let comment = Comment {
            author,
            content,
            created_at: now,
        };
        self.comments.push(comment.clone());
        comment
    }

    /// Case-insensitive substring match on title or content.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.content.to_lowercase().contains(&term)
    }

    /// Comments in the order they were added.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn likes(&self) -> u64 {
        self.count(Reaction::Liked)
    }

    pub fn dislikes(&self) -> u64 {
        self.count(Reaction::Disliked)
    }

    fn count(&self, wanted: Reaction) -> u64 {
        self.reactions.values().filter(|r| **r == wanted).count() as u64
    }

    pub fn reaction_of(&self, caller: &Principal) -> Option<Reaction> {
        self.reactions.get(caller).copied()
    }

    /// Callers currently liking the post, in principal order.
    pub fn liked(&self) -> Vec<&Principal> {
        self.with_reaction(Reaction::Liked)
    }

    /// Callers currently disliking the post, in principal order.
    pub fn disliked(&self) -> Vec<&Principal> {
        self.with_reaction(Reaction::Disliked)
    }

    fn with_reaction(&self, wanted: Reaction) -> Vec<&Principal> {
        self.reactions
            .iter()
            .filter(|(_, reaction)| **reaction == wanted)
            .map(|(principal, _)| principal)
            .collect()
    }

    /// Neutral or disliked -> liked. Returns the new like count.
    pub fn like(&mut self, caller: &Principal) -> Result<u64, DomainError> {
        if self.reaction_of(caller) == Some(Reaction::Liked) {
            return Err(DomainError::Conflict("you can't like a post twice".to_string()));
        }
        self.reactions.insert(caller.clone(), Reaction::Liked);
        Ok(self.likes())
    }

    /// Liked -> neutral. Returns the new like count.
    pub fn unlike(&mut self, caller: &Principal) -> Result<u64, DomainError> {
        if self.reaction_of(caller) != Some(Reaction::Liked) {
            return Err(DomainError::Conflict("you haven't liked this post".to_string()));
        }
        self.reactions.remove(caller);
        Ok(self.likes())
    }

    /// Neutral or liked -> disliked. Returns the new dislike count.
    pub fn dislike(&mut self, caller: &Principal) -> Result<u64, DomainError> {
        if self.reaction_of(caller) == Some(Reaction::Disliked) {
            return Err(DomainError::Conflict(
                "you can't dislike a post twice".to_string(),
            ));
        }
        self.reactions.insert(caller.clone(), Reaction::Disliked);
        Ok(self.dislikes())
    }

    /// Disliked -> neutral. Returns the new dislike count.
    pub fn undislike(&mut self, caller: &Principal) -> Result<u64, DomainError> {
        if self.reaction_of(caller) != Some(Reaction::Disliked) {
            return Err(DomainError::Conflict(
                "you haven't disliked this post".to_string(),
            ));
        }
        self.reactions.remove(caller);
        Ok(self.dislikes())
    }
}
