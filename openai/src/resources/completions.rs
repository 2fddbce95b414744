use crate::client::Client;
use crate::types::completion::{Completion, CompletionRequest};
use completion_sdk_core::http::{EndpointConfig, send_json};
use completion_sdk_core::SdkError;
use tracing::{debug, trace};

#[derive(Clone, Debug)]
pub struct CompletionsResource {
    pub(crate) client: Client,
}

impl CompletionsResource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a Completion
    ///
    /// POST /v1/completions
    pub async fn create(&self, request: CompletionRequest) -> Result<Completion, SdkError> {
        let config = EndpointConfig {
            base_url: self.client.config.base_url.clone(),
            endpoint: "/completions".to_string(),
            retry_policy: self.client.config.retry_policy.clone(),
            request_timeout: Some(self.client.config.timeout),
        };
        debug!(model = %request.model, max_tokens = ?request.max_tokens, "creating completion");

        let response = send_json(&self.client.http_client, &config, &request).await?;
        let body = response.text().await?;
        trace!(%body, "completion response body");

        // Malformed bodies are SerializationError, not TransportError.
        let completion: Completion = serde_json::from_str(&body)?;
        debug!(choices = completion.choices.len(), "completion received");
        Ok(completion)
    }
}
