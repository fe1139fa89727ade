//! ArtifyAI Core - domain types and pure logic.
//!
//! Shared by:
//! - `web` - the HTTP service (accounts, generation actions, auxiliary APIs)
//! - `cli` - migrations and maintenance
//! - `integration-tests`
//!
//! # Architecture
//!
//! Nothing in this crate performs I/O. Pricing math, form validation,
//! data-URI handling and the generation lifecycle live here so they can be
//! tested without a database or a model provider.
//!
//! # Modules
//!
//! - [`types`] - Email and typed IDs
//! - [`craft_score`] - Pricing and sustainability heuristic
//! - [`schema`] - Form validation for the three generator forms
//! - [`image`] - Base64 data URIs and image constraints
//! - [`lifecycle`] - Generation request state machine
//! - [`generation`] - Input/output shapes of the generation flows
//! - [`market`] - Market-demand report shapes
//! - [`profile`] - Artisan profile document and landing routes
//! - [`library`] - Saved generation items
//! - [`json_extract`] - Locating JSON objects inside model replies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod craft_score;
pub mod generation;
pub mod image;
pub mod json_extract;
pub mod library;
pub mod lifecycle;
pub mod market;
pub mod profile;
pub mod schema;
pub mod types;

pub use types::*;
