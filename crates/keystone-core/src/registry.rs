//! The sub-agent registry: dispatch key → sub-agent id.
//!
//! Built once at startup by resolving every configured id through an
//! `AgentDirectory`, then shared read-only for the life of the process.
//!
//! Dispatch keys are `"invoke-" + <agent display name>`. When two configured
//! agents produce the same key, the first one registered keeps it and the
//! later one is skipped with a warning.

use std::collections::HashMap;

use tracing::{info, warn};

use keystone_contracts::{
    agent::SubAgentId,
    error::{ToolError, ToolResult},
};

use crate::traits::AgentDirectory;

/// Prefix shared by every dispatch key.
pub const DISPATCH_PREFIX: &str = "invoke-";

/// Build the dispatch key for an agent display name.
pub fn dispatch_key(agent_name: &str) -> String {
    format!("{}{}", DISPATCH_PREFIX, agent_name)
}

/// Immutable mapping from dispatch key to sub-agent id.
#[derive(Debug, Clone, Default)]
pub struct SubAgentRegistry {
    entries: HashMap<String, SubAgentId>,
    /// Keys in registration order.
    order: Vec<String>,
}

impl SubAgentRegistry {
    /// Resolve each id through `directory`, in order, and register it.
    ///
    /// A lookup failure is a `StartupConfig` error naming the id.
    pub async fn build(ids: &[SubAgentId], directory: &dyn AgentDirectory) -> ToolResult<Self> {
        let mut registry = Self::default();

        for id in ids {
            let name = directory
                .agent_name(id)
                .await
                .map_err(|e| ToolError::StartupConfig {
                    reason: format!("failed to resolve sub-agent '{}': {}", id, e),
                })?;
            registry.register(dispatch_key(&name), id.clone());
        }

        info!(
            sub_agents = ?registry.order,
            "sub-agents used by this supervisor"
        );
        Ok(registry)
    }

    /// Build from already-resolved `(agent name, id)` pairs, same collision policy.
    pub fn from_names<I, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, SubAgentId)>,
        N: AsRef<str>,
    {
        let mut registry = Self::default();
        for (name, id) in pairs {
            registry.register(dispatch_key(name.as_ref()), id);
        }
        registry
    }

    fn register(&mut self, key: String, id: SubAgentId) {
        if let Some(existing) = self.entries.get(&key) {
            warn!(
                dispatch_key = %key,
                kept = %existing,
                skipped = %id,
                "duplicate dispatch key, keeping first registration"
            );
            return;
        }
        info!(dispatch_key = %key, agent_id = %id, "registered sub-agent");
        self.order.push(key.clone());
        self.entries.insert(key, id);
    }

    /// The sub-agent id registered under `function`, if any.
    pub fn resolve(&self, function: &str) -> Option<&SubAgentId> {
        self.entries.get(function)
    }

    /// Dispatch keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
