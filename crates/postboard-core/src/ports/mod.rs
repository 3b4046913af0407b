//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod clock;
mod id;
mod repository;

pub use auth::{AuthError, TokenClaims, TokenService};
pub use clock::Clock;
pub use id::IdGenerator;
pub use repository::PostMap;
