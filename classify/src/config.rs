use completion_sdk_core::PromptRequest;

pub const DEFAULT_MODEL: &str = "text-davinci-003";
pub const DEFAULT_PROMPT: &str =
    "Classify this message into categories: 'urgent', 'social', 'work': 'Meeting at 3 PM.'";
pub const DEFAULT_MAX_TOKENS: u32 = 10;

/// What the invoker asks for. The defaults reproduce the stock classification
/// request exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfig {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl InvokerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn to_request(&self) -> PromptRequest {
        PromptRequest::builder()
            .model(self.model.as_str())
            .prompt(self.prompt.as_str())
            .max_tokens(self.max_tokens)
            .build()
    }
}
