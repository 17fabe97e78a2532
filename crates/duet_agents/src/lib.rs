//! # duet_agents
//!
//! Agent proxies for duet.
//!
//! An agent is anything that turns a prompt into a text reply. The review
//! loop only ever talks to the [`Agent`] trait; which model sits behind it is
//! decided when the agent is constructed.
//!
//! | Type | Backing | Use |
//! |------|---------|-----|
//! | [`LlmAgent`] | OpenAI / Anthropic chat APIs | production runs |
//! | [`ScriptedAgent`] | queued replies | tests and dry runs |

pub mod agent;
pub mod error;
pub mod llm;
pub mod scripted;

pub use agent::{Agent, LlmAgent};
pub use error::{AgentError, AgentResult};
pub use llm::{LlmClient, LlmProvider};
pub use scripted::ScriptedAgent;
