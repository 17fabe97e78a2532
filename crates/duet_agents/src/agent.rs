//! The agent seam used by the review loop.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::AgentResult;
use crate::llm::{LlmClient, LlmProvider};

/// A prompt-in, text-out collaborator.
///
/// Implementations must not keep state between calls that changes the
/// meaning of a prompt: every invocation stands on its own.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Display name used in logs and arbitration prompts.
    fn name(&self) -> &str;

    /// Send a prompt and return the agent's reply.
    async fn invoke(&self, prompt: &str) -> AgentResult<String>;
}

#[async_trait]
impl<T: Agent + ?Sized> Agent for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn invoke(&self, prompt: &str) -> AgentResult<String> {
        (**self).invoke(prompt).await
    }
}

/// Agent backed by a chat-completion API with a fixed system prompt.
#[derive(Debug, Clone)]
pub struct LlmAgent {
    name: String,
    system_prompt: String,
    client: LlmClient,
}

impl LlmAgent {
    pub fn new(name: impl Into<String>, client: LlmClient, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            client,
        }
    }

    /// Build an agent whose client reads its credentials from the environment.
    pub fn from_env(
        name: impl Into<String>,
        provider: LlmProvider,
        model: Option<String>,
        system_prompt: impl Into<String>,
    ) -> Self {
        let agent = Self::new(name, LlmClient::from_env(provider, model), system_prompt);
        info!(
            agent = %agent.name,
            provider = %provider,
            model = %agent.client.model(),
            "Configured agent"
        );
        agent
    }
}

#[async_trait]
impl Agent for LlmAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, prompt: &str) -> AgentResult<String> {
        self.client.complete(Some(&self.system_prompt), prompt).await
    }
}
