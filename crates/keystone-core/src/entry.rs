//! Raw-JSON entry point shared by every handler.
//!
//! Decodes the runtime's event, logs it, runs the handler, and encodes the
//! envelope. Hosting code (the demo CLI, or a serverless runtime shim) calls
//! `handle_raw_event` and never touches the typed events directly.

use serde_json::Value;
use tracing::{info, warn};

use keystone_contracts::{
    error::{ToolError, ToolResult},
    event::ActionGroupEvent,
};

use crate::traits::ActionHandler;

/// Run `handler` against one raw runtime event.
///
/// Decoding failures are `InvalidEvent`; encoding failures are
/// `ResponseEncoding`. Handler errors are logged and
/// returned unchanged; no partial response is produced.
pub async fn handle_raw_event(handler: &dyn ActionHandler, raw: Value) -> ToolResult<Value> {
    info!(handler = handler.name(), event = %raw, "received event");

    let event: ActionGroupEvent =
        serde_json::from_value(raw).map_err(|e| ToolError::InvalidEvent {
            reason: e.to_string(),
        })?;

    let envelope = match handler.handle(&event).await {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(
                handler = handler.name(),
                function = %event.function,
                error = %e,
                "invocation failed"
            );
            return Err(e);
        }
    };

    let response = serde_json::to_value(&envelope).map_err(|e| ToolError::ResponseEncoding {
        reason: e.to_string(),
    })?;
    info!(handler = handler.name(), response = %response, "returning response");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;

    use keystone_contracts::response::ResponseEnvelope;

    use crate::envelope::{populate_function_response, require_parameter};

    use super::*;

    /// Echoes the `word` parameter back.
    struct EchoHandler;

    #[async_trait]
    impl ActionHandler for EchoHandler {
        fn name(&self) -> &str {
            "echo"
        }

        async fn handle(&self, event: &ActionGroupEvent) -> ToolResult<ResponseEnvelope> {
            let word = require_parameter(event, "word")?;
            Ok(populate_function_response(event, word))
        }
    }

    #[tokio::test]
    async fn raw_event_round_trips_through_handler() {
        let raw = json!({
            "actionGroup": "EchoGroup",
            "function": "echo",
            "parameters": [{ "name": "word", "type": "string", "value": "ping" }]
        });

        let response = handle_raw_event(&EchoHandler, raw).await.unwrap();

        assert_eq!(response["response"]["actionGroup"], "EchoGroup");
        assert_eq!(
            response["response"]["functionResponse"]["responseBody"]["TEXT"]["body"],
            "ping"
        );
    }

    #[tokio::test]
    async fn undecodable_event_is_invalid() {
        let raw = json!({ "function": "echo" });

        let result = handle_raw_event(&EchoHandler, raw).await;
        assert!(matches!(result, Err(ToolError::InvalidEvent { .. })));
    }

    #[tokio::test]
    async fn handler_errors_propagate_unchanged() {
        let raw = json!({ "actionGroup": "g", "function": "echo", "parameters": [] });

        let result = handle_raw_event(&EchoHandler, raw).await;
        assert!(matches!(result, Err(ToolError::MissingParameter { .. })));
    }
}
