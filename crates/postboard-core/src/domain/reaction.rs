use serde::{Deserialize, Serialize};

/// A caller's reaction to a post. A caller with no entry is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Liked,
    Disliked,
}
