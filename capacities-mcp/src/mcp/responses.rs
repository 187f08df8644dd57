//! Response creation utilities for MCP operations

use crate::error::Result;
use rmcp::model::*;
use serde_json::Value;

/// Create a success response for MCP tool calls
pub fn create_success_response(message: String) -> CallToolResult {
    CallToolResult {
        content: vec![Annotated::new(
            RawContent::Text(RawTextContent { text: message }),
            None,
        )],
        is_error: Some(false),
    }
}

/// Create an error response for MCP tool calls
pub fn create_error_response(message: String) -> CallToolResult {
    CallToolResult {
        content: vec![Annotated::new(
            RawContent::Text(RawTextContent { text: message }),
            None,
        )],
        is_error: Some(true),
    }
}

/// Pretty-print a JSON value with two-space indentation
pub fn pretty_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Shape the body returned by a write endpoint.
///
/// Write endpoints may answer with nothing, with JSON, or with plain text.
/// Blank bodies become a fixed success message, JSON is pretty-printed, and
/// anything else is echoed back inside a success message.
///
/// # Arguments
///
/// * `body` - The raw response text
/// * `label` - What succeeded, e.g. "Weblink saved"
pub fn format_write_response(body: &str, label: &str) -> String {
    if body.trim().is_empty() {
        return format!("Success: {label} (no response data)");
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) => pretty_json(&value).unwrap_or_else(|_| body.to_string()),
        Err(e) => {
            tracing::debug!("Write response is not JSON, returning raw text: {}", e);
            format!("Success: {label}. Response: {body}")
        }
    }
}
