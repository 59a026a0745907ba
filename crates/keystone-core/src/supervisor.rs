//! The supervisor request router.
//!
//! Maps the event's `function` to a registered sub-agent, forwards the
//! caller's `input_text` with its session context, and wraps the sub-agent's
//! answer in the response envelope.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use keystone_contracts::{
    agent::SessionState,
    error::{ToolError, ToolResult},
    event::ActionGroupEvent,
    response::ResponseEnvelope,
};

use crate::{
    config::SupervisorConfig,
    dispatcher::SubAgentDispatcher,
    envelope::{populate_function_response, require_parameter},
    registry::{SubAgentRegistry, DISPATCH_PREFIX},
    traits::{ActionHandler, AgentDirectory, AgentRuntime},
};

/// Parameter carrying the text forwarded to the sub-agent.
pub const INPUT_TEXT_PARAM: &str = "input_text";

/// Routes supervisor tool calls to sub-agents.
pub struct SupervisorRouter {
    registry: Arc<SubAgentRegistry>,
    dispatcher: SubAgentDispatcher,
}

impl SupervisorRouter {
    pub fn new(registry: Arc<SubAgentRegistry>, dispatcher: SubAgentDispatcher) -> Self {
        Self { registry, dispatcher }
    }

    /// Build the registry from `config` and wire a dispatcher over `runtime`.
    ///
    /// This performs one directory lookup per configured sub-agent and must
    /// finish before the first request is handled.
    pub async fn bootstrap(
        config: &SupervisorConfig,
        directory: &dyn AgentDirectory,
        runtime: Arc<dyn AgentRuntime>,
    ) -> ToolResult<Self> {
        let registry = SubAgentRegistry::build(&config.sub_agent_ids, directory).await?;
        let dispatcher = SubAgentDispatcher::new(runtime)
            .with_alias(config.alias_id.clone())
            .with_trace(config.enable_trace);
        Ok(Self::new(Arc::new(registry), dispatcher))
    }

    pub fn registry(&self) -> &SubAgentRegistry {
        &self.registry
    }
}

#[async_trait]
impl ActionHandler for SupervisorRouter {
    fn name(&self) -> &str {
        "supervisor"
    }

    async fn handle(&self, event: &ActionGroupEvent) -> ToolResult<ResponseEnvelope> {
        let function = event.function.as_str();
        let session_id = event
            .session_id
            .as_deref()
            .ok_or_else(|| ToolError::InvalidEvent {
                reason: "supervisor events require 'sessionId'".to_string(),
            })?;

        let (Some(session_attributes), Some(prompt_session_attributes)) = (
            event.session_attributes.as_ref(),
            event.prompt_session_attributes.as_ref(),
        ) else {
            return Err(ToolError::InvalidEvent {
                reason: "supervisor events require 'sessionAttributes' and \
                         'promptSessionAttributes' (null is accepted)"
                    .to_string(),
            });
        };

        let Some(agent_id) = self.registry.resolve(function) else {
            warn!(function = %function, "no sub-agent registered for function");
            return Err(ToolError::UnrecognizedFunction {
                function: function.to_string(),
            });
        };

        let input_text = require_parameter(event, INPUT_TEXT_PARAM)?;

        info!(
            sub_agent = %function.strip_prefix(DISPATCH_PREFIX).unwrap_or(function),
            agent_id = %agent_id,
            session_id = %session_id,
            "invoking sub-agent"
        );

        let session_state = SessionState::from_nullable(
            session_attributes.clone(),
            prompt_session_attributes.clone(),
        );

        let answer = self
            .dispatcher
            .invoke(input_text, session_id, agent_id, session_state)
            .await?;

        Ok(populate_function_response(event, &answer))
    }
}
