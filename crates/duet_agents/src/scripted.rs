//! Scripted agent for testing.
//!
//! Replies come from a queue, then from an optional responder closure.
//! Every prompt is captured so tests can verify what the loop sent.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::agent::Agent;
use crate::error::{AgentError, AgentResult};

/// Closure used once the reply queue is empty.
pub type Responder = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Deterministic [`Agent`] for tests.
#[derive(Clone)]
pub struct ScriptedAgent {
    name: String,
    /// Replies returned in order.
    replies: Arc<RwLock<VecDeque<String>>>,
    /// Fallback once `replies` is drained.
    responder: Option<Responder>,
    /// Prompts received so far.
    prompts: Arc<RwLock<Vec<String>>>,
    /// Simulated failure message returned for every call.
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl ScriptedAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replies: Arc::new(RwLock::new(VecDeque::new())),
            responder: None,
            prompts: Arc::new(RwLock::new(Vec::new())),
            simulate_failure: Arc::new(RwLock::new(None)),
        }
    }

    /// Queue a reply.
    pub fn reply(self, reply: impl Into<String>) -> Self {
        self.replies.write().push_back(reply.into());
        self
    }

    /// Queue several replies.
    pub fn replies<I, S>(self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replies
            .write()
            .extend(replies.into_iter().map(Into::into));
        self
    }

    /// Answer every prompt left after the queue with `f(prompt)`.
    pub fn respond_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.responder = Some(Arc::new(f));
        self
    }

    /// Fail every call with the given message.
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(message.into());
        self
    }

    /// All prompts received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.read().len()
    }

    /// Prompts that contain `needle`.
    pub fn prompts_containing(&self, needle: &str) -> Vec<String> {
        self.prompts
            .read()
            .iter()
            .filter(|p| p.contains(needle))
            .cloned()
            .collect()
    }

    pub fn remaining_replies(&self) -> usize {
        self.replies.read().len()
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, prompt: &str) -> AgentResult<String> {
        self.prompts.write().push(prompt.to_string());

        if let Some(msg) = self.simulate_failure.read().clone() {
            return Err(AgentError::failed(&self.name, msg));
        }

        if let Some(reply) = self.replies.write().pop_front() {
            return Ok(reply);
        }

        match &self.responder {
            Some(f) => Ok(f(prompt)),
            None => Err(AgentError::ScriptExhausted(self.name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order_then_exhausted() {
        let agent = ScriptedAgent::new("A").replies(["one", "two"]);

        assert_eq!(agent.invoke("p1").await.unwrap(), "one");
        assert_eq!(agent.invoke("p2").await.unwrap(), "two");
        assert!(matches!(
            agent.invoke("p3").await,
            Err(AgentError::ScriptExhausted(name)) if name == "A"
        ));
        assert_eq!(agent.prompts(), vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    async fn test_responder_after_queue() {
        let agent = ScriptedAgent::new("B")
            .reply("queued")
            .respond_with(|p| format!("echo: {p}"));

        assert_eq!(agent.invoke("x").await.unwrap(), "queued");
        assert_eq!(agent.invoke("y").await.unwrap(), "echo: y");
    }

    #[tokio::test]
    async fn test_simulated_failure() {
        let agent = ScriptedAgent::new("C")
            .reply("never")
            .simulate_failure("boom");

        let err = agent.invoke("x").await.unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert_eq!(agent.remaining_replies(), 1);
        assert_eq!(agent.call_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let agent = ScriptedAgent::new("D").respond_with(|_| "ok".to_string());
        let handle = agent.clone();

        agent.invoke("first").await.unwrap();
        assert_eq!(handle.prompts_containing("first").len(), 1);
    }
}
