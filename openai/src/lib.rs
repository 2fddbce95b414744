pub mod client;
pub mod resources;
pub mod types;

pub use client::{Client, ClientConfig};
pub use completion_sdk_core::{
    CompletionProvider, PromptRequest, PromptResult, RetryPolicy, SdkError, Usage,
};
use futures_util::future::BoxFuture;
use types::completion::{Completion, CompletionRequest};

impl CompletionProvider for Client {
    fn complete<'a>(
        &'a self,
        request: PromptRequest,
    ) -> BoxFuture<'a, Result<PromptResult, SdkError>> {
        Box::pin(async move {
            let response = self.completions().create(to_openai_request(request)).await?;
            Ok(from_openai_completion(response))
        })
    }
}

fn to_openai_request(req: PromptRequest) -> CompletionRequest {
    CompletionRequest::builder()
        .model(req.model)
        .prompt(req.prompt)
        .max_tokens(req.max_tokens)
        .build()
}

fn from_openai_completion(completion: Completion) -> PromptResult {
    let mut choices = completion.choices;
    choices.sort_by_key(|c| c.index);

    PromptResult {
        model: completion.model,
        choices: choices.into_iter().map(|c| c.text).collect(),
        usage: completion.usage.map(|u| Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        }),
    }
}
