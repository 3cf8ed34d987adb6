use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, LLMError>;

/// The model endpoint, opaque to the loop: one serialized prompt in, the raw
/// response text out. Fallible and non-deterministic; the caller validates
/// the text against the step protocol.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
