//! Domain entities - the core business objects.

mod post;
mod principal;
mod reaction;
mod statistics;

pub use post::{Comment, Post, PostPayload};
pub use principal::Principal;
pub use reaction::Reaction;
pub use statistics::{Statistics, most_disliked, most_liked, unique_authors};
