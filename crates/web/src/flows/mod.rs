//! Named prompt flows.
//!
//! Each flow renders one prompt template from a typed input, sends it to the
//! model in a single round trip and deserializes the reply into a typed
//! output. The reply must contain a JSON object with exactly the output's
//! fields; anything else is an error.

pub mod ads;
pub mod story;
pub mod trends;

use serde::de::DeserializeOwned;
use tracing::instrument;

use artify_core::image::DataUri;
use artify_core::json_extract::extract_json;

use crate::llm::{ChatOptions, ClaudeClient, ContentBlock, LlmError, Message};

/// A prompt ready to send: rendered text plus an optional inline image.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// Template name, used in logs.
    pub name: &'static str,
    pub text: String,
    pub image: Option<DataUri>,
    /// JSON skeleton of the expected output.
    pub output_shape: &'static str,
}

impl RenderedPrompt {
    /// The user turn sent to the model: image first, then instructions.
    #[must_use]
    pub fn into_message(self) -> Message {
        let mut blocks = Vec::with_capacity(2);
        if let Some(image) = &self.image {
            blocks.push(ContentBlock::image(image));
        }
        blocks.push(ContentBlock::text(format!(
            "{}\n\nRespond with a single JSON object of this shape and nothing else:\n{}",
            self.text.trim_end(),
            self.output_shape
        )));
        Message::user_blocks(blocks)
    }
}

/// Send a rendered prompt and parse the reply into `O`.
///
/// # Errors
///
/// Returns `LlmError::Reply` when the reply has no object of the expected
/// shape, or any transport/provider error from the client.
#[instrument(skip(client, prompt), fields(prompt = prompt.name))]
pub async fn run_prompt<O: DeserializeOwned>(
    client: &ClaudeClient,
    prompt: RenderedPrompt,
) -> Result<O, LlmError> {
    let response = client
        .chat(vec![prompt.into_message()], ChatOptions::default())
        .await?;
    let output = extract_json(&response.text())?;
    Ok(output)
}

/// Parse an inline image handed to a prompt.
pub(crate) fn prompt_image(data_uri: &str) -> Result<DataUri, LlmError> {
    DataUri::parse(data_uri).map_err(|_| LlmError::InvalidImage)
}
