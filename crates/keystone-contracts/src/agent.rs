//! Sub-agent invocation types.
//!
//! These describe the request the supervisor sends to a streaming sub-agent
//! and the events that come back. The transport itself lives behind the
//! `AgentRuntime` trait in keystone-core.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Alias selector used when no explicit alias is configured.
///
/// Points at the sub-agent's working draft rather than a published version.
pub const TEST_ALIAS_ID: &str = "TSTALIASID";

/// Opaque handle the orchestration service uses to identify a sub-agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubAgentId(pub String);

impl SubAgentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubAgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session context forwarded to the sub-agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub session_attributes: HashMap<String, String>,
    pub prompt_session_attributes: HashMap<String, String>,
}

impl SessionState {
    /// Build from the event's nullable maps, substituting empty maps for null.
    pub fn from_nullable(
        session_attributes: Option<HashMap<String, String>>,
        prompt_session_attributes: Option<HashMap<String, String>>,
    ) -> Self {
        Self {
            session_attributes: session_attributes.unwrap_or_default(),
            prompt_session_attributes: prompt_session_attributes.unwrap_or_default(),
        }
    }
}

/// One call to a sub-agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeAgentRequest {
    pub input_text: String,
    pub agent_id: SubAgentId,
    pub agent_alias_id: String,
    pub session_id: String,
    pub enable_trace: bool,
    /// Always `false` from the supervisor; the conversation stays open.
    pub end_session: bool,
    pub session_state: SessionState,
}

/// A single frame from a sub-agent's response stream.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// A fragment of the sub-agent's answer, as raw UTF-8 bytes.
    Chunk { bytes: Vec<u8> },
    /// Diagnostic or reasoning information. Never part of the answer.
    Trace { trace: serde_json::Value },
    /// Any frame that is neither a chunk nor a trace.
    Unrecognized { kind: String, detail: String },
}

impl AgentEvent {
    /// Convenience constructor for a text chunk.
    pub fn chunk(text: impl Into<String>) -> Self {
        Self::Chunk {
            bytes: text.into().into_bytes(),
        }
    }

    pub fn trace(trace: serde_json::Value) -> Self {
        Self::Trace { trace }
    }
}
