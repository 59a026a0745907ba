//! # keystone-core
//!
//! Shared handler plumbing and the supervisor for the KEYSTONE action groups.
//!
//! This crate provides:
//! - The trait seams (`ActionHandler`, `AgentDirectory`, `AgentRuntime`)
//! - Parameter extraction and response formatting used by every handler
//! - The sub-agent registry, dispatcher, and `SupervisorRouter`
//! - `handle_raw_event`, the JSON-in/JSON-out entry point
//! - An in-process `MockFleet`, and a Bedrock backend behind `bedrock`
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = SupervisorConfig::from_env()?;
//! let router = SupervisorRouter::bootstrap(&config, &directory, runtime).await?;
//! let response = handle_raw_event(&router, raw_event).await?;
//! ```

pub mod config;
pub mod dispatcher;
pub mod entry;
pub mod envelope;
pub mod mock;
pub mod registry;
pub mod supervisor;
pub mod traits;

#[cfg(feature = "bedrock")]
pub mod bedrock;

pub use config::SupervisorConfig;
pub use dispatcher::SubAgentDispatcher;
pub use entry::handle_raw_event;
pub use registry::SubAgentRegistry;
pub use supervisor::SupervisorRouter;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use keystone_contracts::error::ToolError;

    use crate::{config::SUB_AGENT_IDS_VAR, mock::MockFleet};

    use super::*;

    const FLEET: &str = r#"
        [[agents]]
        id = "a1"
        name = "Foo"
        reply = "hello from foo"
        trace_frames = 3

        [[agents]]
        id = "a2"
        name = "Bar"
        reply = "hello from bar"
    "#;

    /// Startup through raw event, end to end against the mock fleet.
    #[tokio::test]
    async fn supervisor_bootstraps_and_answers_raw_events() {
        let fleet = Arc::new(MockFleet::from_toml_str(FLEET).unwrap());
        let config = SupervisorConfig::from_lookup(|key| {
            (key == SUB_AGENT_IDS_VAR).then(|| "a1, a2".to_string())
        })
        .unwrap();

        let router = SupervisorRouter::bootstrap(&config, fleet.as_ref(), fleet.clone())
            .await
            .unwrap();
        assert_eq!(
            router.registry().keys().collect::<Vec<_>>(),
            vec!["invoke-Foo", "invoke-Bar"]
        );

        let raw = json!({
            "actionGroup": "SupervisorActions",
            "function": "invoke-Bar",
            "parameters": [{ "name": "input_text", "type": "string", "value": "hi" }],
            "sessionId": "s-1",
            "sessionAttributes": null,
            "promptSessionAttributes": null
        });

        let response = handle_raw_event(&router, raw).await.unwrap();
        assert_eq!(
            response["response"]["functionResponse"]["responseBody"]["TEXT"]["body"],
            "hello from bar"
        );
        assert_eq!(fleet.call_count(), 1);
    }

    #[tokio::test]
    async fn traced_supervisor_still_returns_first_chunk() {
        let fleet = Arc::new(MockFleet::from_toml_str(FLEET).unwrap());
        let mut config = SupervisorConfig::new(fleet.ids());
        config.enable_trace = true;

        let router = SupervisorRouter::bootstrap(&config, fleet.as_ref(), fleet.clone())
            .await
            .unwrap();

        let raw = json!({
            "actionGroup": "SupervisorActions",
            "function": "invoke-Foo",
            "parameters": [{ "name": "input_text", "value": "hi" }],
            "sessionId": "s-2",
            "sessionAttributes": {},
            "promptSessionAttributes": {}
        });

        let response = handle_raw_event(&router, raw).await.unwrap();
        assert_eq!(
            response["response"]["functionResponse"]["responseBody"]["TEXT"]["body"],
            "hello from foo"
        );
    }

    #[tokio::test]
    async fn bootstrap_fails_on_unknown_sub_agent() {
        let fleet = Arc::new(MockFleet::from_toml_str(FLEET).unwrap());
        let config = SupervisorConfig::new(vec![keystone_contracts::agent::SubAgentId::new("zz")]);

        let result = SupervisorRouter::bootstrap(&config, fleet.as_ref(), fleet.clone()).await;
        assert!(matches!(result, Err(ToolError::StartupConfig { .. })));
    }
}
