//! Tool registry for MCP operations
//!
//! Every Capacities operation is an [`McpTool`]; the server looks tools up by
//! name here instead of matching on request names.

use super::responses::{create_error_response, create_success_response};
use crate::api::ApiClient;
use crate::error::{CapacitiesError, Result};
use rmcp::model::{CallToolResult, Tool, ToolAnnotations};
use rmcp::Error as McpError;
use std::collections::HashMap;
use std::sync::Arc;

/// Context shared by all tools during execution
#[derive(Clone, Debug)]
pub struct ToolContext {
    /// Client used for every Capacities API request
    pub client: Arc<ApiClient>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Human readable title shown by clients
    fn title(&self) -> &'static str;

    /// Whether the tool only reads data
    fn read_only(&self) -> bool;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> serde_json::Value;

    /// Behavioural hints advertised alongside the schema.
    ///
    /// Every Capacities tool talks to an external service, so `openWorldHint` is always set.
    fn annotations(&self) -> ToolAnnotations {
        ToolAnnotations {
            title: Some(self.title().to_string()),
            read_only_hint: Some(self.read_only()),
            destructive_hint: None,
            idempotent_hint: None,
            open_world_hint: Some(true),
        }
    }

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names, sorted
    pub fn list_tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.list_tool_names()
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| {
                let schema_map = match tool.schema() {
                    serde_json::Value::Object(map) => map,
                    _ => serde_json::Map::new(),
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: Some(tool.annotations()),
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    ///
    /// # Arguments
    ///
    /// * `arguments` - The JSON map of arguments from the MCP request
    ///
    /// # Returns
    ///
    /// * `Result<T, McpError>` - The parsed arguments or an invalid-params error
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_params(format!("Invalid arguments: {e}"), None))
    }

    /// Convert an argument validation failure into an MCP invalid-params error
    pub fn invalid_params(error: CapacitiesError) -> McpError {
        McpError::invalid_params(error.to_string(), None)
    }

    /// Turn the outcome of an operation into a tool result.
    ///
    /// Failures are reported in-band with `is_error` set so the model sees the message.
    pub fn tool_result(tool_name: &str, result: Result<String>) -> CallToolResult {
        match result {
            Ok(text) => create_success_response(text),
            Err(e) => {
                tracing::error!(tool = tool_name, "Tool call failed: {}", e);
                create_error_response(e.to_string())
            }
        }
    }
}

/// Register all Capacities tools with the registry
pub fn register_capacities_tools(registry: &mut ToolRegistry) {
    use super::tools;
    tools::spaces::register_spaces_tools(registry);
    tools::search::register_search_tools(registry);
    tools::weblinks::register_weblink_tools(registry);
    tools::daily_notes::register_daily_note_tools(registry);
}
