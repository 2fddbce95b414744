use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod http;

pub use error::SdkError;
pub use http::RetryPolicy;

/// A provider that can fulfill a single text-completion request.
pub trait CompletionProvider: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: PromptRequest,
    ) -> BoxFuture<'a, Result<PromptResult, SdkError>>;
}

impl<P: CompletionProvider + ?Sized> CompletionProvider for std::sync::Arc<P> {
    fn complete<'a>(
        &'a self,
        request: PromptRequest,
    ) -> BoxFuture<'a, Result<PromptResult, SdkError>> {
        (**self).complete(request)
    }
}

/// A provider-agnostic completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct PromptRequest {
    /// The model identifier (e.g., "text-davinci-003").
    #[builder(into)]
    pub model: String,

    /// The prompt text sent verbatim to the model.
    #[builder(into)]
    pub prompt: String,

    /// Upper bound on generated tokens, passed through untouched.
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptResult {
    /// Model that served the request, as reported by the provider.
    pub model: String,
    /// Candidate completion texts, in provider order.
    pub choices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl PromptResult {
    /// Text of the first candidate, or `NoCompletionError` when there is none.
    pub fn first_text(&self) -> Result<&str, SdkError> {
        self.choices
            .first()
            .map(String::as_str)
            .ok_or_else(|| SdkError::NoCompletionError {
                model: self.model.clone(),
            })
    }
}
