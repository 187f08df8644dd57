//! Search tool for MCP operations

use crate::api::{ApiClient, RequestOptions};
use crate::error::{OperationResultExt, Result};
use crate::mcp::responses::pretty_json;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::mcp::types::SearchRequest;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;
use serde_json::{Map, Value};

const OPERATION: &str = "search content";

/// Tool for searching content across spaces
#[derive(Default)]
pub struct SearchTool;

impl SearchTool {
    /// Creates a new instance of the SearchTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchTool {
    fn name(&self) -> &'static str {
        "capacities_search"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md").trim()
    }

    fn title(&self) -> &'static str {
        "Search Capacities Content"
    }

    fn read_only(&self) -> bool {
        true
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "searchTerm": {
                    "type": "string",
                    "description": "The search term"
                },
                "spaceIds": {
                    "type": "array",
                    "items": { "type": "string", "format": "uuid" },
                    "description": "Array of space IDs to search in"
                },
                "mode": {
                    "type": "string",
                    "enum": ["fullText", "title"],
                    "default": "title",
                    "description": "Search mode: fullText searches all content, title searches only titles"
                },
                "filterStructureIds": {
                    "type": "array",
                    "items": { "type": "string", "format": "uuid" },
                    "description": "Optional array of structure IDs to filter results"
                }
            },
            "required": ["searchTerm", "spaceIds"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchRequest = BaseToolImpl::parse_arguments(arguments)?;
        request.validate().map_err(BaseToolImpl::invalid_params)?;

        tracing::debug!(
            spaces = request.space_ids.len(),
            mode = request.mode.map(|m| m.as_str()),
            "Searching Capacities content"
        );
        Ok(BaseToolImpl::tool_result(
            self.name(),
            search(&context.client, &request).await,
        ))
    }
}

/// Request body for `/search`; optional fields appear only when supplied
pub fn search_body(request: &SearchRequest) -> Value {
    let mut body = Map::new();
    body.insert("searchTerm".into(), Value::from(request.search_term.as_str()));
    body.insert("spaceIds".into(), Value::from(request.space_ids.clone()));
    if let Some(mode) = request.mode {
        body.insert("mode".into(), Value::from(mode.as_str()));
    }
    if let Some(ids) = &request.filter_structure_ids {
        body.insert("filterStructureIds".into(), Value::from(ids.clone()));
    }
    Value::Object(body)
}

/// POST `/search` and pretty-print the results
pub async fn search(client: &ApiClient, request: &SearchRequest) -> Result<String> {
    run_search(client, request).await.for_operation(OPERATION)
}

async fn run_search(client: &ApiClient, request: &SearchRequest) -> Result<String> {
    let options = RequestOptions::post().json_body(&search_body(request))?;
    let response = client.execute("/search", options).await?;
    let data = response.json().await?;
    pretty_json(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::types::SearchMode;
    use crate::test_utils::MockApi;
    use serde_json::json;
    use std::sync::Arc;

    const SPACE_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
    const STRUCTURE_ID: &str = "9b2f1c3e-4d5a-4b6c-8d7e-0f1a2b3c4d5e";

    fn request() -> SearchRequest {
        SearchRequest {
            search_term: "test query".to_string(),
            space_ids: vec![SPACE_ID.to_string()],
            mode: None,
            filter_structure_ids: None,
        }
    }

    #[test]
    fn test_body_without_optionals() {
        assert_eq!(
            search_body(&request()),
            json!({ "searchTerm": "test query", "spaceIds": [SPACE_ID] })
        );
    }

    #[test]
    fn test_body_key_order_with_optionals() {
        let mut request = request();
        request.mode = Some(SearchMode::FullText);
        request.filter_structure_ids = Some(vec![STRUCTURE_ID.to_string()]);

        let body = serde_json::to_string(&search_body(&request)).unwrap();
        assert_eq!(
            body,
            format!(
                r#"{{"searchTerm":"test query","spaceIds":["{SPACE_ID}"],"mode":"fullText","filterStructureIds":["{STRUCTURE_ID}"]}}"#
            )
        );
    }

    #[test]
    fn test_empty_filter_list_is_still_sent() {
        let mut request = request();
        request.filter_structure_ids = Some(Vec::new());
        assert_eq!(search_body(&request)["filterStructureIds"], json!([]));
    }

    #[test]
    fn test_schema_default_mode() {
        let schema = SearchTool::new().schema();
        assert_eq!(schema["properties"]["mode"]["default"], "title");
        assert_eq!(schema["required"], json!(["searchTerm", "spaceIds"]));
    }

    #[tokio::test]
    async fn test_search_posts_body_and_pretty_prints() {
        let results = json!({ "results": [{ "id": "result-1", "title": "Found Item" }] });
        let mock = MockApi::start(200, &results.to_string()).await;

        let output = search(&mock.client("key"), &request()).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/search");
        assert_eq!(
            requests[0].json_body(),
            json!({ "searchTerm": "test query", "spaceIds": [SPACE_ID] })
        );
        assert_eq!(serde_json::from_str::<Value>(&output).unwrap(), results);
        assert!(output.contains("\n  \"results\": ["));
    }

    #[tokio::test]
    async fn test_search_error_is_wrapped() {
        let mock = MockApi::start(400, "Invalid search parameters").await;

        let err = search(&mock.client("key"), &request()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to search content: Capacities API error: 400 Bad Request - Invalid search parameters"
        );
    }

    #[tokio::test]
    async fn test_execute_rejects_unknown_mode() {
        let mock = MockApi::start(200, "{}").await;
        let context = ToolContext::new(Arc::new(mock.client("key")));

        let arguments = json!({
            "searchTerm": "x",
            "spaceIds": [SPACE_ID],
            "mode": "fuzzy"
        });
        let Value::Object(arguments) = arguments else {
            unreachable!()
        };

        let err = SearchTool::new()
            .execute(arguments, &context)
            .await
            .unwrap_err();
        assert!(err.message.contains("Invalid arguments"));
        assert!(mock.requests().is_empty());
    }
}
