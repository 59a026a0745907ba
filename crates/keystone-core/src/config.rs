//! Supervisor startup configuration.
//!
//! Read once from the environment before the registry is built. Any problem
//! here is a `StartupConfig` error and the process must not serve requests.

use tracing::debug;

use keystone_contracts::{
    agent::{SubAgentId, TEST_ALIAS_ID},
    error::{ToolError, ToolResult},
};

/// Comma-separated list of sub-agent ids. Required.
pub const SUB_AGENT_IDS_VAR: &str = "SUB_AGENT_IDS";
/// Alias used for every sub-agent call. Defaults to `TEST_ALIAS_ID`.
pub const SUB_AGENT_ALIAS_VAR: &str = "SUB_AGENT_ALIAS_ID";
/// Enables trace frames and trace logging on sub-agent calls. Defaults to off.
pub const SUB_AGENT_TRACE_VAR: &str = "SUB_AGENT_ENABLE_TRACE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// Sub-agent ids in configuration order.
    pub sub_agent_ids: Vec<SubAgentId>,
    pub alias_id: String,
    pub enable_trace: bool,
}

impl SupervisorConfig {
    /// Configuration with default alias and tracing off.
    pub fn new(sub_agent_ids: Vec<SubAgentId>) -> Self {
        Self {
            sub_agent_ids,
            alias_id: TEST_ALIAS_ID.to_string(),
            enable_trace: false,
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> ToolResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> ToolResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_ids = lookup(SUB_AGENT_IDS_VAR).ok_or_else(|| ToolError::StartupConfig {
            reason: format!("{} is not set", SUB_AGENT_IDS_VAR),
        })?;
        let sub_agent_ids = parse_id_list(&raw_ids)?;

        let alias_id = match lookup(SUB_AGENT_ALIAS_VAR) {
            Some(alias) if !alias.trim().is_empty() => alias.trim().to_string(),
            _ => TEST_ALIAS_ID.to_string(),
        };

        let enable_trace = match lookup(SUB_AGENT_TRACE_VAR) {
            Some(raw) => parse_flag(SUB_AGENT_TRACE_VAR, &raw)?,
            None => false,
        };

        debug!(
            sub_agents = sub_agent_ids.len(),
            alias_id = %alias_id,
            enable_trace,
            "supervisor configuration loaded"
        );

        Ok(Self {
            sub_agent_ids,
            alias_id,
            enable_trace,
        })
    }
}

/// Split a comma-separated id list, trimming whitespace around each entry.
///
/// Order is preserved. An empty entry (e.g. `"a1,,a2"`) is a configuration error.
pub fn parse_id_list(raw: &str) -> ToolResult<Vec<SubAgentId>> {
    raw.split(',')
        .enumerate()
        .map(|(position, entry)| {
            let id = entry.trim();
            if id.is_empty() {
                Err(ToolError::StartupConfig {
                    reason: format!(
                        "{} entry {} is empty in '{}'",
                        SUB_AGENT_IDS_VAR, position, raw
                    ),
                })
            } else {
                Ok(SubAgentId::new(id))
            }
        })
        .collect()
}

fn parse_flag(var: &str, raw: &str) -> ToolResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => Err(ToolError::StartupConfig {
            reason: format!("{} must be a boolean, got '{}'", var, other),
        }),
    }
}
