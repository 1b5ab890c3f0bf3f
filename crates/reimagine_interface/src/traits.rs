//! Trait definition for generative backends.

use async_trait::async_trait;
use reimagine_core::{GenerateRequest, GenerateResponse, Message, Role};
use reimagine_error::{GenerationError, GenerationErrorKind, ReimagineResult};

/// Core trait that all generative backends implement.
///
/// Implementations perform no retries and impose no timeouts of their own;
/// retry policy belongs to the caller.
#[async_trait]
pub trait ReimagineDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> ReimagineResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4.1").
    fn model_name(&self) -> &str;

    /// Complete a system instruction plus user instruction into free text.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; a response without any text is a
    /// [`GenerationErrorKind::EmptyResponse`].
    async fn complete(&self, system: &str, user: &str) -> ReimagineResult<String> {
        let request = GenerateRequest::builder()
            .messages(vec![
                Message::text(Role::System, system),
                Message::text(Role::User, user),
            ])
            .build()
            .map_err(|e| reimagine_error::BuilderError::from(e.to_string()))?;

        let text = self.generate(&request).await?.text();
        if text.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse).into());
        }
        Ok(text)
    }
}

#[async_trait]
impl<T: ReimagineDriver + ?Sized> ReimagineDriver for std::sync::Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> ReimagineResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reimagine_core::Output;

    struct Echo;

    #[async_trait]
    impl ReimagineDriver for Echo {
        async fn generate(&self, req: &GenerateRequest) -> ReimagineResult<GenerateResponse> {
            let echoed = req
                .messages()
                .iter()
                .map(|m| format!("{}:{}", m.role().as_ref(), m.joined_text()))
                .collect::<Vec<_>>()
                .join("|");
            Ok(GenerateResponse::new(vec![Output::Text(echoed)]))
        }

        fn provider_name(&self) -> &'static str {
            "echo"
        }

        fn model_name(&self) -> &str {
            "echo-1"
        }
    }

    struct Silent;

    #[async_trait]
    impl ReimagineDriver for Silent {
        async fn generate(&self, _req: &GenerateRequest) -> ReimagineResult<GenerateResponse> {
            Ok(GenerateResponse::new(vec![Output::Text("   ".into())]))
        }

        fn provider_name(&self) -> &'static str {
            "silent"
        }

        fn model_name(&self) -> &str {
            "silent-1"
        }
    }

    #[tokio::test]
    async fn test_complete_sends_system_then_user() {
        let text = Echo.complete("be terse", "summarize").await.unwrap();
        assert_eq!(text, "system:be terse|user:summarize");
    }

    #[tokio::test]
    async fn test_complete_rejects_blank_output() {
        let err = Silent.complete("s", "u").await.unwrap_err();
        assert!(err.to_string().contains("empty completion"));
    }
}
