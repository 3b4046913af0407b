//! # Postboard Core
//!
//! The domain layer of Postboard.
//! Posts, comments, reactions and the aggregate statistics live here, together
//! with the ports the host environment must provide (storage map, clock,
//! identifier generator, token validation). No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::{PostService, ServiceConfig};
