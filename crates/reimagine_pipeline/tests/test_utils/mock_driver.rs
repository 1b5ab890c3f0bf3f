//! Scripted generative backend for testing.

use async_trait::async_trait;
use reimagine_core::{GenerateRequest, GenerateResponse, Output, Role};
use reimagine_error::{GenerationError, GenerationErrorKind, ReimagineResult};
use reimagine_interface::ReimagineDriver;
use reimagine_pipeline::prompts;
use std::sync::Mutex;

/// Pipeline call site a request came from, recognized by its system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    LocalSummary,
    Merge,
    Consolidation,
    World,
    Mapping,
    Scene,
    Polish,
}

impl Stage {
    /// Identify the stage from a system prompt.
    pub fn of(system: &str) -> Option<Self> {
        let scene_system = prompts::scene(prompts::SceneBrief {
            story_dna: "",
            transformation_map: "",
            position: reimagine_core::ScenePosition::Opening,
            source_moment: "",
            word_count: 0,
            previous_summary: None,
        })
        .system;

        [
            (prompts::local_summary("").system, Stage::LocalSummary),
            (prompts::merge("", "").system, Stage::Merge),
            (prompts::consolidation("").system, Stage::Consolidation),
            (prompts::world_definition("", "").system, Stage::World),
            (prompts::transformation_mapping("", "").system, Stage::Mapping),
            (scene_system, Stage::Scene),
            (prompts::polish("", "", 0).system, Stage::Polish),
        ]
        .into_iter()
        .find(|(candidate, _)| candidate == system)
        .map(|(_, stage)| stage)
    }
}

/// A single mock response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Text(String),
    Error,
}

impl MockResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn json(value: serde_json::Value) -> Self {
        Self::Text(format!("```json\n{}\n```", value))
    }
}

/// One request the mock received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub stage: Stage,
    pub user: String,
}

type Responder = Box<dyn Fn(Stage, &str) -> MockResponse + Send + Sync>;

/// Mock backend answering per stage.
///
/// The responder sees the stage and the user prompt; every call is recorded
/// so tests can check what each stage was asked.
pub struct MockStoryDriver {
    responder: Responder,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockStoryDriver {
    /// Mock answering with `responder`.
    pub fn new(responder: impl Fn(Stage, &str) -> MockResponse + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock whose every call raises.
    pub fn always_failing() -> Self {
        Self::new(|_, _| MockResponse::Error)
    }

    /// Every recorded call, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of times generate() was called.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// User prompts sent to one stage, in order.
    pub fn prompts_for(&self, stage: Stage) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.stage == stage)
            .map(|call| call.user.clone())
            .collect()
    }
}

#[async_trait]
impl ReimagineDriver for MockStoryDriver {
    async fn generate(&self, req: &GenerateRequest) -> ReimagineResult<GenerateResponse> {
        let text_for = |role: Role| {
            req.messages()
                .iter()
                .find(|m| *m.role() == role)
                .map(|m| m.joined_text())
                .unwrap_or_default()
        };
        let system = text_for(Role::System);
        let user = text_for(Role::User);
        let stage = Stage::of(&system).expect("request from an unknown call site");

        self.calls.lock().unwrap().push(RecordedCall {
            stage,
            user: user.clone(),
        });

        match (self.responder)(stage, &user) {
            MockResponse::Text(text) => Ok(GenerateResponse::new(vec![Output::Text(text)])),
            MockResponse::Error => Err(GenerationError::new(GenerationErrorKind::Unavailable(
                "mock backend down".to_string(),
            ))
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-story"
    }
}
