//! Space info tool for MCP operations

use crate::api::{ApiClient, RequestOptions};
use crate::error::{OperationResultExt, Result};
use crate::mcp::responses::pretty_json;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::GetSpaceInfoRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

const OPERATION: &str = "get space info";

/// Tool for reading the structures and collections of a space
#[derive(Default)]
pub struct GetSpaceInfoTool;

impl GetSpaceInfoTool {
    /// Creates a new instance of the GetSpaceInfoTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetSpaceInfoTool {
    fn name(&self) -> &'static str {
        "capacities_get_space_info"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md").trim()
    }

    fn title(&self) -> &'static str {
        "Get Capacities Space Info"
    }

    fn read_only(&self) -> bool {
        true
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "spaceId": {
                    "type": "string",
                    "format": "uuid",
                    "description": "The UUID of the space to get info for"
                }
            },
            "required": ["spaceId"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GetSpaceInfoRequest = BaseToolImpl::parse_arguments(arguments)?;
        request.validate().map_err(BaseToolImpl::invalid_params)?;

        tracing::debug!(space_id = %request.space_id, "Fetching space info");
        Ok(BaseToolImpl::tool_result(
            self.name(),
            get_space_info(&context.client, &request).await,
        ))
    }
}

/// Fetch `/space-info` for one space and pretty-print the result
pub async fn get_space_info(client: &ApiClient, request: &GetSpaceInfoRequest) -> Result<String> {
    fetch_space_info(client, &request.space_id)
        .await
        .for_operation(OPERATION)
}

async fn fetch_space_info(client: &ApiClient, space_id: &str) -> Result<String> {
    let endpoint = format!("/space-info?spaceid={space_id}");
    let response = client.execute(&endpoint, RequestOptions::get()).await?;
    let data = response.json().await?;
    pretty_json(&data)
}
