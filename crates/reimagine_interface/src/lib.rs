//! Trait definitions for the Reimagine pipeline's external collaborators.
//!
//! The pipeline never talks to a provider or a document format directly:
//! generative calls go through [`ReimagineDriver`] and document text comes
//! from a [`TextExtractor`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extract;
mod traits;

pub use extract::{PlainTextExtractor, TextExtractor};
pub use traits::ReimagineDriver;
