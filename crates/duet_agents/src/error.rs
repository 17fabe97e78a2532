//! Error types for agent calls.

use thiserror::Error;

/// Result type alias for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors raised while talking to an agent.
///
/// None of these are retried; they end the run.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("{provider} credentials missing: set {env_var}")]
    MissingCredentials {
        provider: String,
        env_var: &'static str,
    },

    #[error("Network error calling {provider}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error {status}: {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {provider} response: {message}")]
    Decode { provider: String, message: String },

    #[error("No response from {0}")]
    EmptyResponse(String),

    #[error("Agent {0} has no scripted reply left")]
    ScriptExhausted(String),

    #[error("Agent {agent} failed: {message}")]
    Failed { agent: String, message: String },
}

impl AgentError {
    /// Create a generic agent failure.
    pub fn failed(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            agent: agent.into(),
            message: message.into(),
        }
    }
}
