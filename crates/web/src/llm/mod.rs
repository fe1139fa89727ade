//! Text generation through the Anthropic Messages API.
//!
//! Every generative feature goes through [`ClaudeClient`]: the three
//! structured flows in [`crate::flows`] and the free-text calls made by the
//! craft-score, market-demand, translation and speech endpoints. Requests
//! carry the configured timeout and are never retried.

mod client;
mod error;
pub mod types;

pub use client::{ChatOptions, ClaudeClient};
pub use error::LlmError;
pub use types::{ChatResponse, ContentBlock, ImageSource, Message, MessageContent};
