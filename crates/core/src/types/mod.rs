//! Core types for ArtifyAI.

pub mod email;
pub mod id;

pub use email::{Email, EmailError};
pub use id::*;
