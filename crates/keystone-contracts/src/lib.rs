//! # keystone-contracts
//!
//! Shared types for the KEYSTONE mortgage assistant action-group handlers.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only wire types and error definitions.

pub mod agent;
pub mod error;
pub mod event;
pub mod response;

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use crate::agent::{AgentEvent, SessionState};
    use crate::error::{StreamFailure, ToolError};
    use crate::event::ActionGroupEvent;
    use crate::response::ResponseEnvelope;

    // ── ActionGroupEvent decoding ────────────────────────────────────────────

    #[test]
    fn event_decodes_supervisor_payload_with_null_attributes() {
        let raw = json!({
            "messageVersion": "1.0",
            "actionGroup": "SupervisorActions",
            "function": "invoke-existing-mortgage-agent",
            "parameters": [
                { "name": "input_text", "type": "string", "value": "what is my balance?" }
            ],
            "sessionId": "session-42",
            "sessionAttributes": null,
            "promptSessionAttributes": null,
            "agent": { "name": "supervisor", "id": "SUP1", "alias": "TSTALIASID", "version": "DRAFT" }
        });

        let event: ActionGroupEvent = serde_json::from_value(raw).unwrap();

        assert_eq!(event.action_group, "SupervisorActions");
        assert_eq!(event.function, "invoke-existing-mortgage-agent");
        assert_eq!(event.parameters.len(), 1);
        assert_eq!(event.parameters[0].kind.as_deref(), Some("string"));
        assert_eq!(event.session_id.as_deref(), Some("session-42"));
        assert_eq!(event.session_attributes, Some(None));
        assert_eq!(event.prompt_session_attributes, Some(None));
        assert_eq!(event.agent.unwrap().name, "supervisor");
    }

    #[test]
    fn event_without_parameters_is_rejected() {
        let raw = json!({
            "actionGroup": "MortgageActions",
            "function": "get_existing_mortgage_details"
        });

        let result: Result<ActionGroupEvent, _> = serde_json::from_value(raw);
        assert!(result.is_err(), "parameters is a required key");
    }

    #[test]
    fn event_session_attributes_decode_as_string_map() {
        let raw = json!({
            "actionGroup": "g",
            "function": "f",
            "parameters": [],
            "sessionAttributes": { "customer_tier": "gold" },
            "promptSessionAttributes": {}
        });

        let event: ActionGroupEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(
            event
                .session_attributes
                .flatten()
                .unwrap()
                .get("customer_tier")
                .map(String::as_str),
            Some("gold")
        );
        assert!(event.prompt_session_attributes.flatten().unwrap().is_empty());
    }

    #[test]
    fn absent_attribute_keys_differ_from_null() {
        let raw = json!({
            "actionGroup": "g",
            "function": "f",
            "parameters": [],
            "sessionAttributes": null
        });

        let event: ActionGroupEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.session_attributes, Some(None));
        assert_eq!(event.prompt_session_attributes, None);

        let encoded = serde_json::to_value(&event).unwrap();
        assert!(encoded["sessionAttributes"].is_null());
        assert!(encoded.get("promptSessionAttributes").is_none());
    }

    // ── ResponseEnvelope wire shape ──────────────────────────────────────────

    #[test]
    fn envelope_serializes_to_runtime_shape() {
        let envelope = ResponseEnvelope::text("MortgageActions", "get_x", "hello");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({
                "response": {
                    "actionGroup": "MortgageActions",
                    "function": "get_x",
                    "functionResponse": {
                        "responseBody": { "TEXT": { "body": "hello" } }
                    }
                }
            })
        );
        assert_eq!(envelope.body(), "hello");
    }

    // ── SessionState ─────────────────────────────────────────────────────────

    #[test]
    fn session_state_substitutes_empty_maps_for_null() {
        let mut attrs = HashMap::new();
        attrs.insert("k".to_string(), "v".to_string());

        let state = SessionState::from_nullable(Some(attrs), None);
        assert_eq!(state.session_attributes.len(), 1);
        assert!(state.prompt_session_attributes.is_empty());

        let empty = SessionState::from_nullable(None, None);
        assert_eq!(empty, SessionState::default());
    }

    #[test]
    fn agent_event_chunk_holds_utf8_bytes() {
        match AgentEvent::chunk("hi") {
            AgentEvent::Chunk { bytes } => assert_eq!(bytes, b"hi".to_vec()),
            other => panic!("expected Chunk, got {:?}", other),
        }
    }

    // ── ToolError display messages ───────────────────────────────────────────

    #[test]
    fn error_missing_parameter_display() {
        let err = ToolError::MissingParameter {
            name: "customer_id".to_string(),
        };
        assert_eq!(err.to_string(), "missing mandatory parameter: customer_id");
    }

    #[test]
    fn error_unrecognized_function_display() {
        let err = ToolError::UnrecognizedFunction {
            function: "invoke-Foo".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("unrecognized function"));
        assert!(msg.contains("invoke-Foo"));
    }

    #[test]
    fn error_unexpected_event_keeps_cause() {
        let err: ToolError = StreamFailure::UnrecognizedEvent {
            kind: "returnControl".to_string(),
            detail: "{}".to_string(),
        }
        .into();

        assert!(err.to_string().contains("unexpected event"));
        let source = std::error::Error::source(&err).expect("cause must be preserved");
        assert!(source.to_string().contains("returnControl"));
    }

    #[test]
    fn error_startup_config_display() {
        let err = ToolError::StartupConfig {
            reason: "SUB_AGENT_IDS is not set".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("startup configuration error"));
        assert!(msg.contains("SUB_AGENT_IDS"));
    }

    #[test]
    fn error_response_encoding_is_not_an_invalid_event() {
        let err = ToolError::ResponseEncoding {
            reason: "key must be a string".to_string(),
        };
        assert_eq!(err.to_string(), "failed to encode response: key must be a string");
        assert!(!err.to_string().contains("invalid event"));
    }
}
