//! Weblink saving tool for MCP operations

use crate::api::{ApiClient, RequestOptions};
use crate::error::{OperationResultExt, Result};
use crate::mcp::responses::format_write_response;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SaveWeblinkRequest;
use crate::mcp::validation::{MAX_MD_TEXT_LENGTH, MAX_OVERWRITE_LENGTH, MAX_TAGS};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::{Map, Value};

const OPERATION: &str = "save weblink";
const SUCCESS_LABEL: &str = "Weblink saved";

/// Tool for saving a web link into a space
#[derive(Default)]
pub struct SaveWeblinkTool;

impl SaveWeblinkTool {
    /// Creates a new instance of the SaveWeblinkTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SaveWeblinkTool {
    fn name(&self) -> &'static str {
        "capacities_save_weblink"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md").trim()
    }

    fn title(&self) -> &'static str {
        "Save Weblink to Capacities"
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
                    "description": "The UUID of the space to save the weblink to"
                },
                "url": {
                    "type": "string",
                    "format": "uri",
                    "description": "The URL to save"
                },
                "titleOverwrite": {
                    "type": "string",
                    "maxLength": MAX_OVERWRITE_LENGTH,
                    "description": "Optional custom title for the weblink"
                },
                "descriptionOverwrite": {
                    "type": "string",
                    "maxLength": MAX_OVERWRITE_LENGTH,
                    "description": "Optional custom description for the weblink"
                },
                "tags": {
                    "type": "array",
                    "items": { "type": "string" },
                    "maxItems": MAX_TAGS,
                    "description": "Optional tags to add to the weblink. Tags need to exactly match your tag names in Capacities, otherwise they will be created."
                },
                "mdText": {
                    "type": "string",
                    "maxLength": MAX_MD_TEXT_LENGTH,
                    "description": "Text formatted as markdown that will be added to the notes section"
                }
            },
            "required": ["spaceId", "url"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SaveWeblinkRequest = BaseToolImpl::parse_arguments(arguments)?;
        request.validate().map_err(BaseToolImpl::invalid_params)?;

        tracing::info!(space_id = %request.space_id, url = %request.url, "Saving weblink");
        Ok(BaseToolImpl::tool_result(
            self.name(),
            save_weblink(&context.client, &request).await,
        ))
    }
}

/// Request body for `/save-weblink`.
///
/// Optional strings are sent only when non-empty; `tags` is sent whenever
/// supplied, even as an empty list.
pub fn weblink_body(request: &SaveWeblinkRequest) -> Value {
    let mut body = Map::new();
    body.insert("spaceId".into(), Value::from(request.space_id.as_str()));
    body.insert("url".into(), Value::from(request.url.as_str()));
    insert_non_empty(&mut body, "titleOverwrite", &request.title_overwrite);
    insert_non_empty(
        &mut body,
        "descriptionOverwrite",
        &request.description_overwrite,
    );
    if let Some(tags) = &request.tags {
        body.insert("tags".into(), Value::from(tags.clone()));
    }
    insert_non_empty(&mut body, "mdText", &request.md_text);
    Value::Object(body)
}

fn insert_non_empty(body: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        body.insert(key.into(), Value::from(value));
    }
}

/// POST `/save-weblink` and describe the outcome
pub async fn save_weblink(client: &ApiClient, request: &SaveWeblinkRequest) -> Result<String> {
    post_weblink(client, request).await.for_operation(OPERATION)
}

async fn post_weblink(client: &ApiClient, request: &SaveWeblinkRequest) -> Result<String> {
    let options = RequestOptions::post().json_body(&weblink_body(request))?;
    let response = client.execute("/save-weblink", options).await?;
    let text = response.text().await?;
    Ok(format_write_response(&text, SUCCESS_LABEL))
}
