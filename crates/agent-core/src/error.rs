use thiserror::Error;

/// Session-level errors. None of these are fatal to the process: a protocol
/// or model failure ends the current inner loop and the user may issue a new
/// query.
#[derive(Error, Debug)]
pub enum AgentError {
    /// The model's response was not a valid step, or the loop could not make
    /// progress with it.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The model endpoint failed (network, API, auth).
    #[error("model error: {0}")]
    Llm(String),
}
