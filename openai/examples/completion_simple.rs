use openai_sdk::{types::completion::CompletionRequest, Client};
use std::env;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = env::var("OPENAI_API_KEY").map_err(|_| "OPENAI_API_KEY must be set")?;

    let client = Client::new(api_key)?;

    let request = CompletionRequest::builder()
        .model("gpt-3.5-turbo-instruct")
        .prompt("Say hello in one sentence.")
        .max_tokens(32_u32)
        .build();

    let response = client.completions().create(request).await?;

    for choice in response.choices {
        println!("{}", choice.text.trim());
    }

    Ok(())
}
