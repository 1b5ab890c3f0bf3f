//! Shared helpers for pipeline integration tests.

#![allow(dead_code)]

mod mock_driver;
mod stories;

pub use mock_driver::{MockResponse, MockStoryDriver, RecordedCall, Stage};
pub use stories::{MARS_BRIEF, mars_driver, mars_response, source_text};
