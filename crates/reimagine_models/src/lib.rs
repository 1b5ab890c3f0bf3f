//! Generative backend integrations for Reimagine.
//!
//! # Available Providers
//!
//! - **OpenAI** and OpenAI-compatible chat-completions endpoints
//!
//! ```no_run
//! use reimagine_models::OpenAiClient;
//! use reimagine_interface::ReimagineDriver;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::from_env("gpt-4.1")?.with_temperature(1.0);
//! let text = client.complete("You are a terse narrator.", "Describe Mars at dawn.").await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, OpenAiClient,
};
