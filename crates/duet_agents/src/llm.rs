//! LLM client for chat completions.
//!
//! Supports the OpenAI and Anthropic APIs. Each call is a single
//! system + user exchange; no conversation history is kept and failed
//! requests are not retried.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AgentError, AgentResult};

/// Default completion budget per reply.
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// LLM provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    /// Environment variable holding the API key.
    pub fn key_env_var(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Environment variable that overrides the API base URL.
    pub fn base_url_env_var(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_BASE_URL",
            Self::Anthropic => "ANTHROPIC_BASE_URL",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAI => "https://api.openai.com",
            Self::Anthropic => "https://api.anthropic.com",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAI => "gpt-5-mini",
            Self::Anthropic => "claude-sonnet-4.5",
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "OpenAI"),
            Self::Anthropic => write!(f, "Anthropic"),
        }
    }
}

/// Client for a single provider/model pair.
#[derive(Clone)]
pub struct LlmClient {
    provider: LlmProvider,
    api_key: Option<String>,
    model: String,
    base_url: String,
    max_tokens: u32,
    client: reqwest::Client,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl LlmClient {
    /// Create a new client with explicit configuration.
    ///
    /// A missing key is accepted here and reported on the first call.
    pub fn new(provider: LlmProvider, api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            provider,
            api_key: api_key.filter(|k| !k.is_empty()),
            model: model.unwrap_or_else(|| provider.default_model().to_string()),
            base_url: provider.default_base_url().to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from the provider's environment variables.
    ///
    /// Reads the API key and base URL override once.
    pub fn from_env(provider: LlmProvider, model: Option<String>) -> Self {
        let api_key = std::env::var(provider.key_env_var()).ok();
        let client = Self::new(provider, api_key, model);

        match std::env::var(provider.base_url_env_var()) {
            Ok(url) if !url.is_empty() => client.with_base_url(url),
            _ => client,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the current provider
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Get the current model
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one system + user exchange and return the reply text.
    pub async fn complete(&self, system: Option<&str>, prompt: &str) -> AgentResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AgentError::MissingCredentials {
                provider: self.provider.to_string(),
                env_var: self.provider.key_env_var(),
            })?;

        debug!(
            provider = %self.provider,
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending completion request"
        );

        match self.provider {
            LlmProvider::OpenAI => self.complete_openai(api_key, system, prompt).await,
            LlmProvider::Anthropic => self.complete_anthropic(api_key, system, prompt).await,
        }
    }

    // OpenAI chat completion
    async fn complete_openai(
        &self,
        api_key: &str,
        system: Option<&str>,
        prompt: &str,
    ) -> AgentResult<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        messages.push(OpenAIMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        let request = OpenAIRequest {
            model: self.model.clone(),
            messages,
            max_completion_tokens: Some(self.max_tokens),
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = self.check_status(response).await?;

        let result: OpenAIResponse = response.json().await.map_err(|e| self.decode_error(e))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AgentError::EmptyResponse(self.provider.to_string()))
    }

    // Anthropic chat completion
    async fn complete_anthropic(
        &self,
        api_key: &str,
        system: Option<&str>,
        prompt: &str,
    ) -> AgentResult<String> {
        let url = format!("{}/v1/messages", self.base_url);

        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: system.map(str::to_string),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = self.check_status(response).await?;

        let result: AnthropicResponse =
            response.json().await.map_err(|e| self.decode_error(e))?;

        result
            .content
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| AgentError::EmptyResponse(self.provider.to_string()))
    }

    async fn check_status(&self, response: reqwest::Response) -> AgentResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AgentError::Api {
            provider: self.provider.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    fn transport_error(&self, source: reqwest::Error) -> AgentError {
        AgentError::Transport {
            provider: self.provider.to_string(),
            source,
        }
    }

    fn decode_error(&self, e: reqwest::Error) -> AgentError {
        AgentError::Decode {
            provider: self.provider.to_string(),
            message: e.to_string(),
        }
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: String,
}

// Anthropic API types
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: String,
}
