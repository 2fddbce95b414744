use clap::Parser;
use completion_sdk_core::SdkError;
use openai_sdk::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use openai_sdk::{Client, ClientConfig};
use std::io::Write;
use std::time::Duration;
use tracing::debug;

use crate::config::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_PROMPT, InvokerConfig};
use crate::error::ClassifyError;
use crate::invoker::Invoker;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Completion model to use
    #[arg(short, long, env = "CLASSIFY_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Prompt to send
    #[arg(short, long, env = "CLASSIFY_PROMPT", default_value = DEFAULT_PROMPT)]
    pub prompt: String,

    /// Max tokens to sample
    #[arg(long, env = "CLASSIFY_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// API key (can also be set via OPENAI_API_KEY env var)
    #[arg(short, long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL for the API
    #[arg(short, long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Retries for rate limits, server errors and network failures
    #[arg(long, default_value_t = 0)]
    pub max_retries: u32,

    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn invoker_config(&self) -> InvokerConfig {
        InvokerConfig::new()
            .with_model(self.model.clone())
            .with_prompt(self.prompt.clone())
            .with_max_tokens(self.max_tokens)
    }

    pub fn client_config(&self) -> Result<ClientConfig, SdkError> {
        let api_key = self.api_key.clone().ok_or_else(|| SdkError::AuthenticationError {
            status: None,
            message: "API key must be provided via --api-key or OPENAI_API_KEY env var"
                .to_string(),
        })?;

        Ok(ClientConfig::new(api_key)?
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout))
            .with_max_retries(self.max_retries))
    }
}

/// Build the client from `args`, run one classification, write the answer to `out`.
pub async fn run<W: Write>(args: &Args, out: &mut W) -> Result<String, ClassifyError> {
    let client_config = args.client_config()?;
    debug!(config = ?client_config, "client configured");

    let client = Client::from_config(client_config)?;
    let invoker = Invoker::new(client, args.invoker_config());
    invoker.run(out).await
}
