//! OpenAI chat-completions backend.

mod client;
mod dto;

pub use client::OpenAiClient;
pub use dto::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage,
};
