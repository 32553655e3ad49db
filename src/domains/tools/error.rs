//! Dispatch errors for tool calls arriving over HTTP.

use thiserror::Error;

/// Failures that happen before a tool body runs.
///
/// Upstream failures inside a call are reported to the client as an error
/// `CallToolResult` instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The arguments did not match the tool's parameter schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArguments(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_is_invalid_arguments() {
        let err = serde_json::from_str::<u64>("\"abc\"").unwrap_err();
        let tool_err = ToolError::from(err);
        assert!(matches!(tool_err, ToolError::InvalidArguments(_)));
        assert!(tool_err.to_string().starts_with("Invalid arguments"));
    }
}
