use completion_sdk_core::{CompletionProvider, PromptResult, SdkError};
use std::io::Write;
use tracing::{debug, info, instrument};

use crate::config::InvokerConfig;
use crate::error::ClassifyError;

/// Issues one completion request and reports the first answer.
///
/// The invoker owns its provider and configuration and carries no state
/// between calls, so repeated invocations against a deterministic provider
/// return the same text.
#[derive(Debug, Clone)]
pub struct Invoker<P> {
    provider: P,
    config: InvokerConfig,
}

impl<P: CompletionProvider> Invoker<P> {
    pub fn new(provider: P, config: InvokerConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Send the configured request and return the trimmed first completion.
    #[instrument(skip(self), fields(model = %self.config.model, max_tokens = self.config.max_tokens))]
    pub async fn invoke(&self) -> Result<String, SdkError> {
        let result = self.provider.complete(self.config.to_request()).await?;
        debug!(choices = result.choices.len(), "completion received");
        extract_answer(&result)
    }

    /// Invoke, then write the answer and a newline to `out`.
    ///
    /// Nothing is written when the request fails.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<String, ClassifyError> {
        let answer = self.invoke().await?;
        writeln!(out, "{}", answer)?;
        out.flush()?;
        info!(answer = %answer, "classification written");
        Ok(answer)
    }
}

/// Trimmed text of the first choice. Interior whitespace is left alone.
pub fn extract_answer(result: &PromptResult) -> Result<String, SdkError> {
    Ok(result.first_text()?.trim_matches(is_strippable).to_string())
}

/// Unicode whitespace plus the ASCII file, group, record and unit separators
/// (`\x1c`..=`\x1f`), which `char::is_whitespace` leaves out.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}
