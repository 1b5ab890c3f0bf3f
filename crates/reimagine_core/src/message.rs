//! Message types for conversation history.

use crate::{Input, Role};
use serde::{Deserialize, Serialize};

/// A message in a generation request.
///
/// # Examples
///
/// ```
/// use reimagine_core::{Message, Role};
///
/// let message = Message::text(Role::System, "You are a literary analyst.");
/// assert_eq!(*message.role(), Role::System);
/// assert_eq!(message.content().len(), 1);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The content of the message
    content: Vec<Input>,
}

impl Message {
    /// Creates a new builder for `Message`.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Single-part text message.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![Input::Text(text.into())],
        }
    }

    /// Concatenated text of all content parts.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(Input::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
