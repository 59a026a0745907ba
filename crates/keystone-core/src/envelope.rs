//! Parameter extraction and response formatting.
//!
//! Every handler reads its inputs through `get_named_parameter` /
//! `require_parameter` and returns through `populate_function_response`.

use std::fmt::Display;

use keystone_contracts::{
    error::{ToolError, ToolResult},
    event::ActionGroupEvent,
    response::ResponseEnvelope,
};

/// Return the value of the first parameter named exactly `name`.
///
/// Later records with the same name are ignored. Matching is case-sensitive.
pub fn get_named_parameter<'a>(event: &'a ActionGroupEvent, name: &str) -> ToolResult<&'a str> {
    event
        .parameters
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.value.as_str())
        .ok_or_else(|| ToolError::MissingParameter {
            name: name.to_string(),
        })
}

/// Like `get_named_parameter`, but an empty value also counts as missing.
pub fn require_parameter<'a>(event: &'a ActionGroupEvent, name: &str) -> ToolResult<&'a str> {
    let value = get_named_parameter(event, name)?;
    if value.is_empty() {
        return Err(ToolError::MissingParameter {
            name: name.to_string(),
        });
    }
    Ok(value)
}

/// Wrap `result` in the runtime's response envelope.
///
/// The body is always `result.to_string()`. Structured results render through
/// their `Display` impl; nothing is JSON-encoded here.
pub fn populate_function_response<T>(event: &ActionGroupEvent, result: &T) -> ResponseEnvelope
where
    T: Display + ?Sized,
{
    ResponseEnvelope::text(
        event.action_group.clone(),
        event.function.clone(),
        result.to_string(),
    )
}
