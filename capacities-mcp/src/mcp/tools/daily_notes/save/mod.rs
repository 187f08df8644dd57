//! Daily note tool for MCP operations

use crate::api::{ApiClient, RequestOptions};
use crate::error::{OperationResultExt, Result};
use crate::mcp::responses::format_write_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SaveToDailyNoteRequest;
use crate::mcp::validation::MAX_MD_TEXT_LENGTH;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::{Map, Value};

const OPERATION: &str = "save to daily note";
const SUCCESS_LABEL: &str = "Content saved to daily note";

/// Tool for appending markdown to today's daily note
#[derive(Default)]
pub struct SaveToDailyNoteTool;

impl SaveToDailyNoteTool {
    /// Creates a new instance of the SaveToDailyNoteTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SaveToDailyNoteTool {
    fn name(&self) -> &'static str {
        "capacities_save_to_daily_note"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md").trim()
    }

    fn title(&self) -> &'static str {
        "Save to Daily Note"
    }

    fn read_only(&self) -> bool {
        false
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "spaceId": {
                    "type": "string",
                    "format": "uuid",
                    "description": "The UUID of the space to save to the daily note"
                },
                "mdText": {
                    "type": "string",
                    "maxLength": MAX_MD_TEXT_LENGTH,
                    "description": "The markdown text to add to today's daily note"
                },
                "origin": {
                    "type": "string",
                    "enum": ["commandPalette"],
                    "description": "Optional origin label for the content (only 'commandPalette' is supported)"
                },
                "noTimestamp": {
                    "type": "boolean",
                    "description": "If true, no time stamp will be added to the note"
                }
            },
            "required": ["spaceId", "mdText"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SaveToDailyNoteRequest = BaseToolImpl::parse_arguments(arguments)?;
        request.validate().map_err(BaseToolImpl::invalid_params)?;

        tracing::info!(
            space_id = %request.space_id,
            chars = request.md_text.chars().count(),
            "Saving to daily note"
        );
        Ok(BaseToolImpl::tool_result(
            self.name(),
            save_to_daily_note(&context.client, &request).await,
        ))
    }
}

/// Request body for `/save-to-daily-note`.
///
/// `noTimestamp` is sent whenever supplied, `false` included.
pub fn daily_note_body(request: &SaveToDailyNoteRequest) -> Value {
    let mut body = Map::new();
    body.insert("spaceId".into(), Value::from(request.space_id.as_str()));
    body.insert("mdText".into(), Value::from(request.md_text.as_str()));
    if let Some(origin) = request.origin {
        body.insert("origin".into(), Value::from(origin.as_str()));
    }
    if let Some(no_timestamp) = request.no_timestamp {
        body.insert("noTimestamp".into(), Value::Bool(no_timestamp));
    }
    Value::Object(body)
}

/// POST `/save-to-daily-note` and describe the outcome
pub async fn save_to_daily_note(
    client: &ApiClient,
    request: &SaveToDailyNoteRequest,
) -> Result<String> {
    post_daily_note(client, request)
        .await
        .for_operation(OPERATION)
}

async fn post_daily_note(client: &ApiClient, request: &SaveToDailyNoteRequest) -> Result<String> {
    let options = RequestOptions::post().json_body(&daily_note_body(request))?;
    let response = client.execute("/save-to-daily-note", options).await?;
    let text = response.text().await?;
    Ok(format_write_response(&text, SUCCESS_LABEL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::types::DailyNoteOrigin;
    use crate::test_utils::MockApi;
    use serde_json::json;
    use std::sync::Arc;

    const SPACE_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

    fn request(md_text: &str) -> SaveToDailyNoteRequest {
        SaveToDailyNoteRequest {
            space_id: SPACE_ID.to_string(),
            md_text: md_text.to_string(),
            origin: None,
            no_timestamp: None,
        }
    }

    #[test]
    fn test_body_includes_false_timestamp_flag() {
        let mut request = request("Test note");
        request.origin = Some(DailyNoteOrigin::CommandPalette);
        request.no_timestamp = Some(false);

        let body = serde_json::to_string(&daily_note_body(&request)).unwrap();
        assert_eq!(
            body,
            format!(
                r#"{{"spaceId":"{SPACE_ID}","mdText":"Test note","origin":"commandPalette","noTimestamp":false}}"#
            )
        );
    }

    #[test]
    fn test_body_omits_unset_optionals() {
        assert_eq!(
            daily_note_body(&request("Test note")),
            json!({ "spaceId": SPACE_ID, "mdText": "Test note" })
        );
    }

    #[tokio::test]
    async fn test_empty_response_body() {
        let mock = MockApi::start(200, "").await;

        let result = save_to_daily_note(&mock.client("key"), &request("Test note"))
            .await
            .unwrap();
        assert_eq!(
            result,
            "Success: Content saved to daily note (no response data)"
        );

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/save-to-daily-note");
        assert_eq!(requests[0].header("authorization"), Some("Bearer key"));
    }

    #[tokio::test]
    async fn test_plain_text_response_body() {
        let mock = MockApi::start(200, "OK").await;

        let result = save_to_daily_note(&mock.client("key"), &request("Test note"))
            .await
            .unwrap();
        assert_eq!(result, "Success: Content saved to daily note. Response: OK");
    }

    #[tokio::test]
    async fn test_json_response_body() {
        let mock = MockApi::start(200, r#"{"success":true,"id":"note-123"}"#).await;

        let result = save_to_daily_note(&mock.client("key"), &request("Test note"))
            .await
            .unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(&result).unwrap(),
            json!({ "success": true, "id": "note-123" })
        );
        assert!(result.starts_with("{\n  \"success\": true"));
    }

    #[tokio::test]
    async fn test_api_error_is_wrapped() {
        let mock = MockApi::start(400, "Invalid request").await;

        let err = save_to_daily_note(&mock.client("key"), &request("Test note"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to save to daily note: Capacities API error: 400 Bad Request - Invalid request"
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_oversized_text() {
        let mock = MockApi::start(200, "").await;
        let context = ToolContext::new(Arc::new(mock.client("key")));

        let mut arguments = serde_json::Map::new();
        arguments.insert("spaceId".to_string(), json!(SPACE_ID));
        arguments.insert(
            "mdText".to_string(),
            json!("a".repeat(MAX_MD_TEXT_LENGTH + 1)),
        );

        let err = SaveToDailyNoteTool::new()
            .execute(arguments, &context)
            .await
            .unwrap_err();
        assert!(err.message.contains("mdText"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_execute_success_result() {
        let mock = MockApi::start(200, "").await;
        let context = ToolContext::new(Arc::new(mock.client("key")));

        let mut arguments = serde_json::Map::new();
        arguments.insert("spaceId".to_string(), json!(SPACE_ID));
        arguments.insert("mdText".to_string(), json!("## Notes"));
        arguments.insert("noTimestamp".to_string(), json!(true));

        let result = SaveToDailyNoteTool::new()
            .execute(arguments, &context)
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(mock.requests()[0].json_body()["noTimestamp"], json!(true));
    }
}
