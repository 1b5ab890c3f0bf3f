use crate::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use reimagine_core::{GenerateRequest, GenerateResponse, Output};
use reimagine_error::{
    BuilderError, GenerationError, GenerationErrorKind, ReimagineError, ReimagineResult,
};
use reimagine_interface::ReimagineDriver;
use reqwest::Client;
use tracing::{debug, error, instrument};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Client for OpenAI and OpenAI-compatible chat-completions endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiClient {
    /// Creates a new client against the public OpenAI endpoint.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g., "gpt-4.1")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        debug!("Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_API_BASE.to_string(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Creates a client reading the API key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns error if the variable is not set.
    #[instrument(skip_all)]
    pub fn from_env(model: impl Into<String>) -> ReimagineResult<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|e| {
            GenerationError::new(GenerationErrorKind::MissingApiKey(format!(
                "{}: {}",
                API_KEY_VAR, e
            )))
        })?;
        Ok(Self::new(api_key, model))
    }

    /// Point the client at an OpenAI-compatible base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sampling temperature sent with every request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Completion token cap sent with every request.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends a request to the chat-completions endpoint.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, GenerationError> {
        debug!("Sending chat-completions request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send chat-completions request");
                GenerationError::new(GenerationErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat-completions endpoint returned error");
            return Err(GenerationError::new(GenerationErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat-completions response");
            GenerationError::new(GenerationErrorKind::ResponseParsing(e.to_string()))
        })?;

        debug!(response_id = %parsed.id(), choices = parsed.choices().len(), "Received completion");
        Ok(parsed)
    }

    /// Converts a generic request into a chat-completions request.
    fn convert_request(&self, request: &GenerateRequest) -> ReimagineResult<ChatCompletionRequest> {
        let messages = request
            .messages()
            .iter()
            .map(|message| ChatMessage::new(message.role().as_ref(), message.joined_text()))
            .collect::<Vec<_>>();

        ChatCompletionRequest::builder()
            .model(request.model().clone().unwrap_or_else(|| self.model.clone()))
            .messages(messages)
            .temperature(request.temperature().or(self.temperature))
            .max_tokens(request.max_tokens().or(self.max_tokens))
            .build()
            .map_err(|e| ReimagineError::from(BuilderError::from(e.to_string())))
    }

    /// Converts a chat-completions response; only the first choice is used.
    fn convert_response(response: &ChatCompletionResponse) -> GenerateResponse {
        let outputs = response
            .choices()
            .first()
            .and_then(|choice| choice.message().content().clone())
            .map(Output::Text)
            .into_iter()
            .collect();
        GenerateResponse::new(outputs)
    }
}

#[async_trait::async_trait]
impl ReimagineDriver for OpenAiClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> ReimagineResult<GenerateResponse> {
        let request = self.convert_request(req)?;
        let response = self.chat(&request).await?;
        Ok(Self::convert_response(&response))
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
