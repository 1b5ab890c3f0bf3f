//! Bounded retry with per-call-site fallback.
//!
//! Every generative call in the pipeline goes through
//! [`attempt_with_policy`]: call the backend, interpret the raw text, and
//! retry on either a raised error or a rejected response. When attempts run
//! out, the call site's fallback produces a value and the run continues in
//! degraded form. The degradation is logged and handed back to the caller.

use crate::{SchemaViolation, extract_json, validation::Schema};
use derive_getters::Getters;
use reimagine_interface::ReimagineDriver;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_retry2::{Retry, RetryError, strategy::FixedInterval};
use tracing::{error, info, warn};

/// How many times a call site asks the backend before falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct RetryPolicy {
    max_attempts: usize,
}

impl RetryPolicy {
    /// Attempts used when nothing else is configured.
    pub const DEFAULT_ATTEMPTS: usize = 3;

    /// Policy allowing `max_attempts` sequential attempts (at least one).
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ATTEMPTS)
    }
}

/// System and user instruction pair sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Standing instruction
    pub system: String,
    /// Task payload
    pub user: String,
}

impl Prompt {
    /// Pair a system instruction with a user instruction.
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Why a single attempt did not produce an accepted value.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum AttemptFailure {
    /// The generative call raised
    #[display("generative call failed: {}", _0)]
    Call(String),
    /// No JSON could be extracted from the response
    #[display("no structured output in response")]
    Unparsable,
    /// Structured output failed validation
    #[display("invalid structured output: {}", _0)]
    Invalid(SchemaViolation),
}

impl From<SchemaViolation> for AttemptFailure {
    fn from(violation: SchemaViolation) -> Self {
        Self::Invalid(violation)
    }
}

/// Record of a call site that fell back after exhausting its attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Degradation {
    site: String,
    attempts: usize,
    reason: String,
}

impl Degradation {
    /// Degradation of `site` after `attempts` tries, for `reason`.
    pub fn new(site: impl Into<String>, attempts: usize, reason: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            attempts,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for Degradation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} fell back after {} attempt(s): {}",
            self.site, self.attempts, self.reason
        )
    }
}

/// Result of a guarded call: accepted output or a fallback value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// An attempt produced an accepted value
    Accepted(T),
    /// Attempts ran out; the value came from the fallback
    Degraded {
        /// Fallback value
        value: T,
        /// What went wrong
        degradation: Degradation,
    },
}

impl<T> Outcome<T> {
    /// The value, accepted or not.
    pub fn value(&self) -> &T {
        match self {
            Self::Accepted(value) | Self::Degraded { value, .. } => value,
        }
    }

    /// Whether the fallback was used.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Split into the value and the degradation record, if any.
    pub fn into_parts(self) -> (T, Option<Degradation>) {
        match self {
            Self::Accepted(value) => (value, None),
            Self::Degraded { value, degradation } => (value, Some(degradation)),
        }
    }

    /// Take the value and push any degradation onto `log`.
    pub fn record(self, log: &mut Vec<Degradation>) -> T {
        let (value, degradation) = self.into_parts();
        log.extend(degradation);
        value
    }

    /// Transform the value, keeping the degradation record.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Accepted(value) => Outcome::Accepted(f(value)),
            Self::Degraded { value, degradation } => Outcome::Degraded {
                value: f(value),
                degradation,
            },
        }
    }
}

/// Extract JSON from `raw` and decode it as `T` after its structural check.
///
/// # Examples
///
/// ```
/// use reimagine_core::NewWorld;
/// use reimagine_pipeline::{AttemptFailure, interpret_json};
///
/// let world: NewWorld = interpret_json("```json\n{\"setting\": \"Mars\"}\n```").unwrap();
/// assert_eq!(world.setting, "Mars");
///
/// let err = interpret_json::<NewWorld>("no JSON here").unwrap_err();
/// assert_eq!(err, AttemptFailure::Unparsable);
/// ```
pub fn interpret_json<T: Schema>(raw: &str) -> Result<T, AttemptFailure> {
    let value = extract_json(raw).ok_or(AttemptFailure::Unparsable)?;
    Ok(T::from_checked(value)?)
}

/// Call the backend until `interpret` accepts a response, or fall back.
///
/// Attempts are sequential with no delay between them. A call that raises
/// and a response that `interpret` rejects both consume an attempt. After
/// the last attempt `fallback` receives the raw text of the most recent
/// response that came back at all, or `None` if every call raised.
#[tracing::instrument(
    skip(driver, prompt, interpret, fallback),
    fields(max_attempts = policy.max_attempts)
)]
pub async fn attempt_with_policy<D, T, I, F>(
    driver: &D,
    policy: RetryPolicy,
    site: &str,
    prompt: &Prompt,
    interpret: I,
    fallback: F,
) -> Outcome<T>
where
    D: ReimagineDriver + ?Sized,
    I: Fn(&str) -> Result<T, AttemptFailure>,
    F: FnOnce(Option<String>) -> T,
{
    let attempts = AtomicUsize::new(0);
    let last_raw: Mutex<Option<String>> = Mutex::new(None);
    let max_attempts = policy.max_attempts;

    let strategy = FixedInterval::from_millis(0).take(max_attempts - 1);
    let result = {
        let attempts = &attempts;
        let last_raw = &last_raw;
        let interpret = &interpret;
        Retry::spawn(strategy, move || async move {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            info!(site, attempt, max_attempts, "Calling generative backend");

            let failure = match driver.complete(&prompt.system, &prompt.user).await {
                Ok(raw) => {
                    let interpreted = interpret(&raw);
                    if let Ok(mut slot) = last_raw.lock() {
                        *slot = Some(raw);
                    }
                    match interpreted {
                        Ok(value) => return Ok(value),
                        Err(failure) => failure,
                    }
                }
                Err(e) => AttemptFailure::Call(e.to_string()),
            };

            warn!(site, attempt, max_attempts, reason = %failure, "Attempt rejected");
            Err(RetryError::Transient {
                err: failure,
                retry_after: None,
            })
        })
        .await
    };

    match result {
        Ok(value) => Outcome::Accepted(value),
        Err(failure) => {
            let used = attempts.load(Ordering::SeqCst);
            error!(site, attempts = used, reason = %failure, "Attempts exhausted, using fallback");
            let raw = last_raw.into_inner().ok().flatten();
            Outcome::Degraded {
                value: fallback(raw),
                degradation: Degradation::new(site, used, failure.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reimagine_core::{GenerateRequest, GenerateResponse, Output};
    use reimagine_error::{GenerationError, GenerationErrorKind, ReimagineResult};
    use std::collections::VecDeque;

    /// Replies from a fixed script; `None` entries raise.
    struct Scripted {
        replies: Mutex<VecDeque<Option<&'static str>>>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(replies: Vec<Option<&'static str>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReimagineDriver for Scripted {
        async fn generate(&self, _req: &GenerateRequest) -> ReimagineResult<GenerateResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.replies.lock().unwrap().pop_front().flatten();
            match reply {
                Some(text) => Ok(GenerateResponse::new(vec![Output::Text(text.into())])),
                None => Err(GenerationError::new(GenerationErrorKind::Unavailable("down".into())).into()),
            }
        }

        fn provider_name(&self) -> &'static str {
            "scripted"
        }

        fn model_name(&self) -> &str {
            "scripted-1"
        }
    }

    fn prompt() -> Prompt {
        Prompt::new("system", "user")
    }

    fn as_number(raw: &str) -> Result<u32, AttemptFailure> {
        raw.trim().parse().map_err(|_| AttemptFailure::Unparsable)
    }

    #[tokio::test]
    async fn test_first_success_stops_retrying() {
        let driver = Scripted::new(vec![Some("7"), Some("8")]);
        let outcome =
            attempt_with_policy(&driver, RetryPolicy::default(), "number", &prompt(), as_number, |_| 0)
                .await;

        assert_eq!(outcome, Outcome::Accepted(7));
        assert_eq!(driver.calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_then_valid() {
        let driver = Scripted::new(vec![Some("seven"), None, Some("9")]);
        let outcome =
            attempt_with_policy(&driver, RetryPolicy::new(3), "number", &prompt(), as_number, |_| 0)
                .await;

        assert_eq!(outcome, Outcome::Accepted(9));
        assert_eq!(driver.calls(), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_passes_last_raw_to_fallback() {
        let driver = Scripted::new(vec![Some("first"), Some("second"), None]);
        let outcome = attempt_with_policy(
            &driver,
            RetryPolicy::new(3),
            "scene",
            &prompt(),
            |_raw: &str| -> Result<String, AttemptFailure> { Err(AttemptFailure::Unparsable) },
            |raw| raw.unwrap_or_default(),
        )
        .await;

        assert_eq!(driver.calls(), 3);
        let (value, degradation) = outcome.into_parts();
        assert_eq!(value, "second");
        let degradation = degradation.unwrap();
        assert_eq!(degradation.site(), "scene");
        assert_eq!(*degradation.attempts(), 3);
        assert!(degradation.reason().contains("generative call failed"));
    }

    #[tokio::test]
    async fn test_every_call_raising_gives_no_raw() {
        let driver = Scripted::new(vec![None, None, None]);
        let outcome = attempt_with_policy(
            &driver,
            RetryPolicy::default(),
            "scene",
            &prompt(),
            |raw: &str| Ok(raw.to_string()),
            |raw| raw.unwrap_or_else(|| "placeholder".into()),
        )
        .await;

        assert!(outcome.is_degraded());
        assert_eq!(outcome.value(), "placeholder");
    }

    #[tokio::test]
    async fn test_single_attempt_policy() {
        let driver = Scripted::new(vec![None, Some("1")]);
        let outcome =
            attempt_with_policy(&driver, RetryPolicy::new(0), "number", &prompt(), as_number, |_| 42)
                .await;

        assert_eq!(*outcome.value(), 42);
        assert_eq!(driver.calls(), 1);
    }

    #[test]
    fn test_interpret_json_reports_violation() {
        let err = interpret_json::<reimagine_core::NewWorld>(r#"{"setting": ""}"#).unwrap_err();
        assert!(matches!(err, AttemptFailure::Invalid(SchemaViolation::EmptyKey(_))));
    }

    #[test]
    fn test_record_collects_degradations() {
        let mut log = Vec::new();
        let accepted = Outcome::Accepted(1).record(&mut log);
        let degraded = Outcome::Degraded {
            value: 2,
            degradation: Degradation::new("merge", 3, "boom"),
        }
        .record(&mut log);

        assert_eq!(accepted + degraded, 3);
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].to_string(), "merge fell back after 3 attempt(s): boom");
    }
}
