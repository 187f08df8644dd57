//! Space listing tool for MCP operations

use crate::api::{ApiClient, RequestOptions};
use crate::error::{OperationResultExt, Result};
use crate::mcp::responses::pretty_json;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::ListSpacesRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

const OPERATION: &str = "list spaces";

/// Tool for listing all personal spaces
#[derive(Default)]
pub struct ListSpacesTool;

impl ListSpacesTool {
    /// Creates a new instance of the ListSpacesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListSpacesTool {
    fn name(&self) -> &'static str {
        "capacities_list_spaces"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md").trim()
    }

    fn title(&self) -> &'static str {
        "List Capacities Spaces"
    }

    fn read_only(&self) -> bool {
        true
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let _request: ListSpacesRequest = BaseToolImpl::parse_arguments(arguments)?;
        Ok(BaseToolImpl::tool_result(
            self.name(),
            list_spaces(&context.client).await,
        ))
    }
}

/// Fetch `/spaces` and pretty-print the result
pub async fn list_spaces(client: &ApiClient) -> Result<String> {
    fetch_spaces(client).await.for_operation(OPERATION)
}

async fn fetch_spaces(client: &ApiClient) -> Result<String> {
    let response = client.execute("/spaces", RequestOptions::get()).await?;
    let data = response.json().await?;
    pretty_json(&data)
}
