//! In-process sub-agent fleet for tests and demos.
//!
//! `MockFleet` plays both external collaborators: it answers directory
//! lookups from a fixed table and replies to invocations with a scripted
//! stream (optional trace frames, then one answer chunk). No network calls
//! are made.
//!
//! A fleet is usually loaded from TOML:
//!
//! ```toml
//! [[agents]]
//! id = "AGT1EXISTING"
//! name = "existing-mortgage-agent"
//! reply = "Your outstanding principal is $150,000."
//! trace_frames = 2
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use keystone_contracts::{
    agent::{AgentEvent, InvokeAgentRequest, SubAgentId},
    error::{StreamFailure, ToolError, ToolResult},
};

use crate::traits::{AgentDirectory, AgentEventStream, AgentRuntime};

/// One scripted sub-agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetAgent {
    pub id: String,
    /// Display name returned by the directory lookup.
    pub name: String,
    /// The single answer chunk this agent streams back.
    pub reply: String,
    /// Trace frames emitted before the answer when tracing is requested.
    #[serde(default)]
    pub trace_frames: usize,
}

/// Top-level TOML document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    pub agents: Vec<FleetAgent>,
}

#[derive(Debug)]
pub struct MockFleet {
    agents: HashMap<String, FleetAgent>,
    order: Vec<SubAgentId>,
    call_count: AtomicU32,
}

impl MockFleet {
    pub fn new(agents: Vec<FleetAgent>) -> Self {
        let order = agents.iter().map(|a| SubAgentId::new(a.id.clone())).collect();
        let agents = agents.into_iter().map(|a| (a.id.clone(), a)).collect();
        Self {
            agents,
            order,
            call_count: AtomicU32::new(0),
        }
    }

    /// Parse `s` as a `FleetConfig` TOML document.
    pub fn from_toml_str(s: &str) -> ToolResult<Self> {
        let config: FleetConfig = toml::from_str(s).map_err(|e| ToolError::StartupConfig {
            reason: format!("failed to parse fleet TOML: {}", e),
        })?;
        Ok(Self::new(config.agents))
    }

    pub fn from_file(path: &Path) -> ToolResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ToolError::StartupConfig {
            reason: format!("failed to read fleet file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Agent ids in declaration order.
    pub fn ids(&self) -> Vec<SubAgentId> {
        self.order.clone()
    }

    /// Number of `invoke_agent` calls served so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    fn agent(&self, agent_id: &SubAgentId) -> ToolResult<&FleetAgent> {
        self.agents
            .get(agent_id.as_str())
            .ok_or_else(|| ToolError::Upstream {
                reason: format!("no agent with id '{}'", agent_id),
            })
    }
}

#[async_trait]
impl AgentDirectory for MockFleet {
    async fn agent_name(&self, agent_id: &SubAgentId) -> ToolResult<String> {
        Ok(self.agent(agent_id)?.name.clone())
    }
}

#[async_trait]
impl AgentRuntime for MockFleet {
    async fn invoke_agent(&self, request: InvokeAgentRequest) -> ToolResult<AgentEventStream> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let agent = self.agent(&request.agent_id)?;

        debug!(agent_id = %request.agent_id, session_id = %request.session_id, "mock invoke");

        let mut events: Vec<Result<AgentEvent, StreamFailure>> = Vec::new();
        if request.enable_trace {
            for step in 0..agent.trace_frames {
                events.push(Ok(AgentEvent::trace(json!({
                    "agentId": agent.id,
                    "sessionId": request.session_id,
                    "step": step,
                }))));
            }
        }
        events.push(Ok(AgentEvent::chunk(agent.reply.clone())));

        Ok(stream::iter(events).boxed())
    }
}

#[cfg(test)]
mod tests {
    use keystone_contracts::agent::{SessionState, TEST_ALIAS_ID};

    use super::*;

    const FLEET: &str = r#"
        [[agents]]
        id = "AGT1"
        name = "existing-mortgage-agent"
        reply = "balance is 150000"
        trace_frames = 2

        [[agents]]
        id = "AGT2"
        name = "mortgage-application-agent"
        reply = "one document missing"
    "#;

    fn request(agent_id: &str, enable_trace: bool) -> InvokeAgentRequest {
        InvokeAgentRequest {
            input_text: "hi".to_string(),
            agent_id: SubAgentId::new(agent_id),
            agent_alias_id: TEST_ALIAS_ID.to_string(),
            session_id: "s-1".to_string(),
            enable_trace,
            end_session: false,
            session_state: SessionState::default(),
        }
    }

    #[test]
    fn fleet_parses_from_toml_in_order() {
        let fleet = MockFleet::from_toml_str(FLEET).unwrap();
        assert_eq!(fleet.ids(), vec![SubAgentId::new("AGT1"), SubAgentId::new("AGT2")]);
    }

    #[test]
    fn malformed_toml_is_a_startup_error() {
        let result = MockFleet::from_toml_str("[[agents]]\nid = 1");
        assert!(matches!(result, Err(ToolError::StartupConfig { .. })));
    }

    #[tokio::test]
    async fn directory_returns_display_name() {
        let fleet = MockFleet::from_toml_str(FLEET).unwrap();
        let name = fleet.agent_name(&SubAgentId::new("AGT2")).await.unwrap();
        assert_eq!(name, "mortgage-application-agent");
    }

    #[tokio::test]
    async fn traces_precede_the_answer_only_when_requested() {
        let fleet = MockFleet::from_toml_str(FLEET).unwrap();

        let traced: Vec<_> = fleet.invoke_agent(request("AGT1", true)).await.unwrap().collect().await;
        assert_eq!(traced.len(), 3);
        assert!(matches!(traced[0], Ok(AgentEvent::Trace { .. })));
        assert!(matches!(traced[2], Ok(AgentEvent::Chunk { .. })));

        let quiet: Vec<_> = fleet.invoke_agent(request("AGT1", false)).await.unwrap().collect().await;
        assert_eq!(quiet.len(), 1);
        assert_eq!(fleet.call_count(), 2);
    }

    #[tokio::test]
    async fn unknown_agent_is_an_upstream_error() {
        let fleet = MockFleet::from_toml_str(FLEET).unwrap();
        assert!(matches!(
            fleet.agent_name(&SubAgentId::new("nope")).await,
            Err(ToolError::Upstream { .. })
        ));
        assert!(fleet.invoke_agent(request("nope", false)).await.is_err());
    }
}
