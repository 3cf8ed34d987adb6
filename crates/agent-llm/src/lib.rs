pub mod gemini;
pub mod provider;

pub use gemini::GeminiProvider;
pub use provider::{LLMError, LLMProvider, Result};
