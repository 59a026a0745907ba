//! Error types shared by every KEYSTONE handler.
//!
//! Every fallible operation returns `ToolResult<T>`. None of these errors are
//! recovered locally: each one aborts the current invocation, and
//! `StartupConfig` aborts the process before any request is served.

use thiserror::Error;

/// Failure while consuming a sub-agent's response stream.
#[derive(Debug, Error)]
pub enum StreamFailure {
    /// The stream yielded a frame that is neither a chunk nor a trace.
    #[error("unrecognized stream event '{kind}': {detail}")]
    UnrecognizedEvent { kind: String, detail: String },

    /// The transport failed mid-stream.
    #[error("event stream transport failed: {0}")]
    Transport(String),

    /// An answer chunk did not decode as UTF-8.
    #[error("answer chunk is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The stream closed before any answer chunk arrived.
    #[error("event stream ended without an answer chunk")]
    EndedWithoutAnswer,
}

/// The unified error type for the KEYSTONE handlers.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required named parameter is absent or empty.
    #[error("missing mandatory parameter: {name}")]
    MissingParameter { name: String },

    /// The event's `function` has no matching handler or dispatch entry.
    #[error("unrecognized function: {function}")]
    UnrecognizedFunction { function: String },

    /// Consuming the sub-agent stream failed. `cause` holds the original failure.
    #[error("unexpected event: {cause}")]
    UnexpectedEvent {
        #[source]
        cause: StreamFailure,
    },

    /// Sub-agent configuration is absent or an identifier could not be resolved.
    #[error("startup configuration error: {reason}")]
    StartupConfig { reason: String },

    /// The inbound event could not be decoded or lacks a required field.
    #[error("invalid event: {reason}")]
    InvalidEvent { reason: String },

    /// The response envelope could not be encoded for the runtime.
    #[error("failed to encode response: {reason}")]
    ResponseEncoding { reason: String },

    /// A call to the orchestration service failed before any stream was read.
    #[error("upstream call failed: {reason}")]
    Upstream { reason: String },
}

impl From<StreamFailure> for ToolError {
    fn from(cause: StreamFailure) -> Self {
        ToolError::UnexpectedEvent { cause }
    }
}

/// Convenience alias used throughout the KEYSTONE crates.
pub type ToolResult<T> = Result<T, ToolError>;
