//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Author of a message sent to a generative backend.
///
/// # Examples
///
/// ```
/// use reimagine_core::Role;
///
/// assert_ne!(Role::System, Role::User);
/// assert_eq!(format!("{}", Role::System), "System");
/// assert_eq!(Role::Assistant.as_ref(), "assistant");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// System messages carry the standing instruction
    System,
    /// User messages carry the task payload
    User,
    /// Assistant messages are model output
    Assistant,
}
