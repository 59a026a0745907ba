//! Trait seams for the KEYSTONE handlers.
//!
//! - `ActionHandler`  — one tool backend, invoked once per runtime event
//! - `AgentDirectory` — resolves a sub-agent id to its display name
//! - `AgentRuntime`   — opens a streaming conversation turn with a sub-agent
//!
//! The last two are external collaborators. The crate ships an in-process
//! fleet for tests and demos (`mock`) and, behind the `bedrock` feature, an
//! adapter for Amazon Bedrock Agents.

use async_trait::async_trait;
use futures::stream::BoxStream;

use keystone_contracts::{
    agent::{AgentEvent, InvokeAgentRequest, SubAgentId},
    error::{StreamFailure, ToolResult},
    event::ActionGroupEvent,
    response::ResponseEnvelope,
};

/// A lazy, single-pass stream of sub-agent frames.
///
/// Not restartable. Consumers may stop polling at any point.
pub type AgentEventStream = BoxStream<'static, Result<AgentEvent, StreamFailure>>;

/// A tool backend invoked by the orchestration runtime.
///
/// Implementations are stateless across invocations. Anything they share
/// between calls must be immutable after construction.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Run the behavior selected by `event.function` and wrap the result.
    ///
    /// Every error aborts the invocation; there is no partial response.
    async fn handle(&self, event: &ActionGroupEvent) -> ToolResult<ResponseEnvelope>;
}

/// Directory lookup against the orchestration service.
#[async_trait]
pub trait AgentDirectory: Send + Sync {
    /// Return the display name of the sub-agent identified by `agent_id`.
    async fn agent_name(&self, agent_id: &SubAgentId) -> ToolResult<String>;
}

/// The streaming agent-invocation API.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Issue one invocation and return its response stream.
    ///
    /// An `Err` here means the call itself failed. Failures while reading
    /// frames are reported through the stream items.
    async fn invoke_agent(&self, request: InvokeAgentRequest) -> ToolResult<AgentEventStream>;
}
