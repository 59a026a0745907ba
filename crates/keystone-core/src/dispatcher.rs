//! The sub-agent dispatcher.
//!
//! Forwards a query to one sub-agent and treats the streaming reply as a
//! blocking request/response: trace frames are skipped and the first answer
//! chunk is returned. The stream is never polled after that chunk.
//!
//! Multi-chunk answers are truncated to their first chunk. Callers that need
//! the full answer must not rely on this dispatcher until chunk reassembly is
//! agreed with the sub-agent owners.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, info};

use keystone_contracts::{
    agent::{AgentEvent, InvokeAgentRequest, SessionState, SubAgentId, TEST_ALIAS_ID},
    error::{StreamFailure, ToolError, ToolResult},
};

use crate::traits::{AgentEventStream, AgentRuntime};

/// Sends queries to sub-agents through an `AgentRuntime`.
#[derive(Clone)]
pub struct SubAgentDispatcher {
    runtime: Arc<dyn AgentRuntime>,
    alias_id: String,
    enable_trace: bool,
}

impl SubAgentDispatcher {
    /// A dispatcher using the test alias with tracing off.
    pub fn new(runtime: Arc<dyn AgentRuntime>) -> Self {
        Self {
            runtime,
            alias_id: TEST_ALIAS_ID.to_string(),
            enable_trace: false,
        }
    }

    pub fn with_alias(mut self, alias_id: impl Into<String>) -> Self {
        self.alias_id = alias_id.into();
        self
    }

    pub fn with_trace(mut self, enable_trace: bool) -> Self {
        self.enable_trace = enable_trace;
        self
    }

    pub fn alias_id(&self) -> &str {
        &self.alias_id
    }

    pub fn trace_enabled(&self) -> bool {
        self.enable_trace
    }

    /// Invoke `agent_id` with `query` and return its first answer chunk.
    ///
    /// # Errors
    ///
    /// - `Upstream` if the invocation call itself fails.
    /// - `UnexpectedEvent` for any failure while reading the stream, with the
    ///   original `StreamFailure` as its cause.
    pub async fn invoke(
        &self,
        query: &str,
        session_id: &str,
        agent_id: &SubAgentId,
        session_state: SessionState,
    ) -> ToolResult<String> {
        let request = InvokeAgentRequest {
            input_text: query.to_string(),
            agent_id: agent_id.clone(),
            agent_alias_id: self.alias_id.clone(),
            session_id: session_id.to_string(),
            enable_trace: self.enable_trace,
            end_session: false,
            session_state,
        };

        debug!(
            agent_id = %agent_id,
            alias_id = %self.alias_id,
            session_id = %session_id,
            enable_trace = self.enable_trace,
            "invoking sub-agent"
        );

        let stream = self.runtime.invoke_agent(request).await?;

        first_answer_chunk(stream, self.enable_trace)
            .await
            .map_err(|cause| ToolError::UnexpectedEvent { cause })
    }
}

/// Consume `stream` in delivery order and return the first chunk as text.
///
/// - `Chunk`: decoded as UTF-8 and returned immediately.
/// - `Trace`: logged when `enable_trace` is set, then skipped.
/// - `Unrecognized`: fails with `StreamFailure::UnrecognizedEvent`.
///
/// An item-level error ends consumption with that error. A stream that closes
/// without a chunk yields `StreamFailure::EndedWithoutAnswer`.
pub async fn first_answer_chunk(
    mut stream: AgentEventStream,
    enable_trace: bool,
) -> Result<String, StreamFailure> {
    while let Some(item) = stream.next().await {
        match item? {
            AgentEvent::Chunk { bytes } => {
                let answer = String::from_utf8(bytes)?;
                if enable_trace {
                    info!(answer = %answer, "final answer received");
                }
                return Ok(answer);
            }
            AgentEvent::Trace { trace } => {
                if enable_trace {
                    let rendered =
                        serde_json::to_string_pretty(&trace).unwrap_or_else(|_| trace.to_string());
                    info!(trace = %rendered, "sub-agent trace");
                }
            }
            AgentEvent::Unrecognized { kind, detail } => {
                return Err(StreamFailure::UnrecognizedEvent { kind, detail });
            }
        }
    }

    Err(StreamFailure::EndedWithoutAnswer)
}
