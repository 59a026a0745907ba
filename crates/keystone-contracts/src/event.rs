//! Inbound action-group event types.
//!
//! The orchestration runtime delivers one `ActionGroupEvent` per tool call.
//! Field names follow the runtime's camelCase wire format.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A JSON object of string attributes that may be sent as `null`.
pub type AttributeMap = HashMap<String, String>;

/// A single `{name, type, value}` record from the event's parameter list.
///
/// Names are not guaranteed unique within one event. Lookups take the first
/// record whose name matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Declared parameter type (e.g. "string"). Informational only.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub value: String,
}

impl Parameter {
    /// Build a string-typed parameter.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: Some("string".to_string()),
            value: value.into(),
        }
    }
}

/// Identity of the calling agent, as reported by the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallingAgent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub version: String,
}

/// The request descriptor the orchestration runtime sends to a handler.
///
/// `action_group`, `function` and `parameters` are required on every event.
/// The session fields are only consulted by the supervisor handler. The two
/// attribute maps distinguish an absent key (`None`) from an explicit JSON
/// `null` (`Some(None)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGroupEvent {
    /// Opaque action group name, echoed back in the response envelope.
    pub action_group: String,
    /// Selects which behavior the handler runs.
    pub function: String,
    /// Ordered parameter records.
    pub parameters: Vec<Parameter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub session_attributes: Option<Option<AttributeMap>>,
    #[serde(
        default,
        deserialize_with = "present_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt_session_attributes: Option<Option<AttributeMap>>,

    /// Runtime payload version (e.g. "1.0").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_version: Option<String>,
    /// The agent that issued this tool call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<CallingAgent>,
    /// The end user's utterance for this turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
}

impl ActionGroupEvent {
    /// Build a minimal event with no session context.
    pub fn new(
        action_group: impl Into<String>,
        function: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            action_group: action_group.into(),
            function: function.into(),
            parameters,
            session_id: None,
            session_attributes: None,
            prompt_session_attributes: None,
            message_version: None,
            agent: None,
            input_text: None,
        }
    }

    /// Attach a session id.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Attach both attribute maps. `None` is sent as JSON `null`.
    pub fn with_session_attributes(
        mut self,
        session_attributes: Option<AttributeMap>,
        prompt_session_attributes: Option<AttributeMap>,
    ) -> Self {
        self.session_attributes = Some(session_attributes);
        self.prompt_session_attributes = Some(prompt_session_attributes);
        self
    }
}

/// Runs only when the key is present, so `null` becomes `Some(None)` while a
/// missing key falls back to the field default of `None`.
fn present_nullable<'de, D>(deserializer: D) -> Result<Option<Option<AttributeMap>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<AttributeMap>::deserialize(deserializer).map(Some)
}
