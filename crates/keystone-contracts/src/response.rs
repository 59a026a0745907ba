//! The fixed response envelope returned to the orchestration runtime.
//!
//! Shape on the wire:
//!
//! ```json
//! {"response": {"actionGroup": "...", "function": "...",
//!   "functionResponse": {"responseBody": {"TEXT": {"body": "..."}}}}}
//! ```
//!
//! The runtime accepts exactly one text body, so every result is carried as a
//! string.

use serde::{Deserialize, Serialize};

/// Top-level envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub response: ActionResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub action_group: String,
    pub function: String,
    pub function_response: FunctionResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub response_body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(rename = "TEXT")]
    pub text: TextBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBody {
    pub body: String,
}

impl ResponseEnvelope {
    /// Assemble an envelope from its three varying fields.
    pub fn text(
        action_group: impl Into<String>,
        function: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            response: ActionResponse {
                action_group: action_group.into(),
                function: function.into(),
                function_response: FunctionResponse {
                    response_body: ResponseBody {
                        text: TextBody { body: body.into() },
                    },
                },
            },
        }
    }

    /// The text body carried by this envelope.
    pub fn body(&self) -> &str {
        &self.response.function_response.response_body.text.body
    }
}
