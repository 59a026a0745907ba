//! Amazon Bedrock Agents backend (feature `bedrock`).
//!
//! `BedrockAgentDirectory` resolves names with `GetAgent`;
//! `BedrockAgentRuntime` opens turns with `InvokeAgent` and adapts the SDK's
//! event receiver into an `AgentEventStream`.

use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::{
    error::DisplayErrorContext,
    primitives::event_stream::EventReceiver,
    types::{error::ResponseStreamError, ResponseStream, SessionState as SdkSessionState},
};
use futures::{stream, StreamExt};
use serde_json::json;
use tracing::debug;

use keystone_contracts::{
    agent::{AgentEvent, InvokeAgentRequest, SubAgentId},
    error::{StreamFailure, ToolError, ToolResult},
};

use crate::traits::{AgentDirectory, AgentEventStream, AgentRuntime};

/// Directory lookups through the Bedrock Agents control plane.
#[derive(Debug, Clone)]
pub struct BedrockAgentDirectory {
    client: aws_sdk_bedrockagent::Client,
}

impl BedrockAgentDirectory {
    pub fn new(client: aws_sdk_bedrockagent::Client) -> Self {
        Self { client }
    }

    pub fn from_conf(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_bedrockagent::Client::new(sdk_config))
    }
}

#[async_trait]
impl AgentDirectory for BedrockAgentDirectory {
    async fn agent_name(&self, agent_id: &SubAgentId) -> ToolResult<String> {
        let output = self
            .client
            .get_agent()
            .agent_id(agent_id.as_str())
            .send()
            .await
            .map_err(|e| ToolError::Upstream {
                reason: format!(
                    "GetAgent failed for '{}': {}",
                    agent_id,
                    aws_sdk_bedrockagent::error::DisplayErrorContext(&e)
                ),
            })?;

        let agent = output.agent().ok_or_else(|| ToolError::Upstream {
            reason: format!("GetAgent returned no agent for '{}'", agent_id),
        })?;

        debug!(agent_id = %agent_id, agent_name = %agent.agent_name(), "resolved sub-agent");
        Ok(agent.agent_name().to_string())
    }
}

/// Streaming invocations through the Bedrock Agents runtime.
#[derive(Debug, Clone)]
pub struct BedrockAgentRuntime {
    client: aws_sdk_bedrockagentruntime::Client,
}

impl BedrockAgentRuntime {
    pub fn new(client: aws_sdk_bedrockagentruntime::Client) -> Self {
        Self { client }
    }

    pub fn from_conf(sdk_config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_bedrockagentruntime::Client::new(sdk_config))
    }
}

#[async_trait]
impl AgentRuntime for BedrockAgentRuntime {
    async fn invoke_agent(&self, request: InvokeAgentRequest) -> ToolResult<AgentEventStream> {
        let agent_id = request.agent_id.clone();

        let session_state = SdkSessionState::builder()
            .set_session_attributes(Some(request.session_state.session_attributes))
            .set_prompt_session_attributes(Some(request.session_state.prompt_session_attributes))
            .build();

        let output = self
            .client
            .invoke_agent()
            .agent_id(request.agent_id.0)
            .agent_alias_id(request.agent_alias_id)
            .session_id(request.session_id)
            .input_text(request.input_text)
            .enable_trace(request.enable_trace)
            .end_session(request.end_session)
            .session_state(session_state)
            .send()
            .await
            .map_err(|e| ToolError::Upstream {
                reason: format!("InvokeAgent failed for '{}': {}", agent_id, DisplayErrorContext(&e)),
            })?;

        Ok(receiver_stream(output.completion))
    }
}

/// Adapt the SDK receiver into a lazy stream. Frames are pulled only on demand.
fn receiver_stream(receiver: EventReceiver<ResponseStream, ResponseStreamError>) -> AgentEventStream {
    stream::unfold(Some(receiver), |state| async move {
        let mut receiver = state?;
        match receiver.recv().await {
            Ok(Some(frame)) => Some((Ok(convert_frame(frame)), Some(receiver))),
            Ok(None) => None,
            // Yield the error once, then end the stream.
            Err(e) => Some((
                Err(StreamFailure::Transport(DisplayErrorContext(&e).to_string())),
                None,
            )),
        }
    })
    .boxed()
}

/// Map one SDK frame onto an `AgentEvent`.
///
/// A chunk without a payload is not an answer; it surfaces as `Unrecognized`
/// so the dispatcher fails the turn.
fn convert_frame(frame: ResponseStream) -> AgentEvent {
    match frame {
        ResponseStream::Chunk(part) => match part.bytes {
            Some(bytes) => AgentEvent::Chunk {
                bytes: bytes.into_inner(),
            },
            None => AgentEvent::Unrecognized {
                kind: "chunk".to_string(),
                detail: "chunk frame carried no bytes".to_string(),
            },
        },
        ResponseStream::Trace(part) => AgentEvent::Trace {
            trace: json!({
                "agentId": part.agent_id(),
                "agentAliasId": part.agent_alias_id(),
                "agentVersion": part.agent_version(),
                "sessionId": part.session_id(),
                "trace": part.trace().map(|t| format!("{:?}", t)),
            }),
        },
        other => {
            let detail = format!("{:?}", other);
            let kind = detail
                .split(|c: char| c == '(' || c == ' ')
                .next()
                .unwrap_or("unknown")
                .to_string();
            AgentEvent::Unrecognized { kind, detail }
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_bedrockagentruntime::{
        primitives::Blob,
        types::{PayloadPart, TracePart},
    };

    use super::*;

    #[test]
    fn chunk_with_bytes_becomes_answer_chunk() {
        let frame = ResponseStream::Chunk(
            PayloadPart::builder()
                .bytes(Blob::new(b"hello".to_vec()))
                .build(),
        );

        assert_eq!(convert_frame(frame), AgentEvent::chunk("hello"));
    }

    #[test]
    fn chunk_without_bytes_is_unrecognized() {
        let frame = ResponseStream::Chunk(PayloadPart::builder().build());

        match convert_frame(frame) {
            AgentEvent::Unrecognized { kind, .. } => assert_eq!(kind, "chunk"),
            other => panic!("expected Unrecognized, got {:?}", other),
        }
    }

    #[test]
    fn trace_becomes_structured_json() {
        let frame = ResponseStream::Trace(
            TracePart::builder()
                .agent_id("AGT1")
                .agent_alias_id("TSTALIASID")
                .session_id("s-1")
                .build(),
        );

        match convert_frame(frame) {
            AgentEvent::Trace { trace } => {
                assert!(trace.is_object());
                assert_eq!(trace["agentId"], "AGT1");
                assert_eq!(trace["agentAliasId"], "TSTALIASID");
                assert_eq!(trace["sessionId"], "s-1");
                assert!(trace["trace"].is_null());
            }
            other => panic!("expected Trace, got {:?}", other),
        }
    }
}
