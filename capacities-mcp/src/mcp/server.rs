//! MCP server implementation exposing Capacities tools and prompts

use crate::api::ApiClient;
use crate::VERSION;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::prompts::{register_capacities_prompts, PromptArguments, PromptRegistry};
use super::tool_registry::{register_capacities_tools, ToolContext, ToolRegistry};

const SERVER_NAME: &str = "Capacities";

const INSTRUCTIONS: &str = "Access your Capacities knowledge base. Call capacities_list_spaces first \
to find space ids, capacities_get_space_info for structures and collections, and capacities_search \
to find content. Use capacities_save_weblink and capacities_save_to_daily_note to add content. \
The capacities-* prompts format notes before saving them.";

/// MCP server for the Capacities API
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    prompt_registry: Arc<PromptRegistry>,
    /// Tool context containing shared state for tool execution
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a new MCP server around an API client.
    ///
    /// All Capacities tools and prompts are registered.
    pub fn new(client: ApiClient) -> Self {
        let mut tool_registry = ToolRegistry::new();
        register_capacities_tools(&mut tool_registry);

        let mut prompt_registry = PromptRegistry::new();
        register_capacities_prompts(&mut prompt_registry);

        tracing::debug!(
            tools = tool_registry.len(),
            prompts = prompt_registry.len(),
            "Capacities MCP server created"
        );

        Self {
            tool_registry: Arc::new(tool_registry),
            prompt_registry: Arc::new(prompt_registry),
            tool_context: Arc::new(ToolContext::new(Arc::new(client))),
        }
    }

    /// Create a server whose client is configured from the environment
    pub fn from_env() -> Self {
        Self::new(ApiClient::from_env())
    }

    /// The registered tools
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// The registered prompts
    pub fn prompt_registry(&self) -> &PromptRegistry {
        &self.prompt_registry
    }

    /// Render a prompt by name at the given local time.
    ///
    /// Unknown prompts are invalid requests; missing required arguments are invalid params.
    pub fn render_prompt(
        &self,
        name: &str,
        arguments: Option<&serde_json::Map<String, Value>>,
        now: chrono::NaiveDateTime,
    ) -> std::result::Result<GetPromptResult, McpError> {
        let Some(prompt) = self.prompt_registry.get(name) else {
            tracing::warn!("Prompt '{}' not found", name);
            return Err(McpError::invalid_request(
                format!("Unknown prompt: {name}"),
                None,
            ));
        };

        let args = arguments.map(json_map_to_string_map).unwrap_or_default();
        let text = PromptRegistry::render(prompt, &args, now)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        Ok(GetPromptResult {
            description: Some(prompt.description().to_string()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::Text { text },
            }],
        })
    }

    /// Run a tool by name.
    ///
    /// Missing arguments are treated as an empty object.
    pub async fn run_tool(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, Value>>,
    ) -> std::result::Result<CallToolResult, McpError> {
        match self.tool_registry.get_tool(name) {
            Some(tool) => {
                tracing::debug!(tool = name, "Calling tool");
                tool.execute(arguments.unwrap_or_default(), &self.tool_context)
                    .await
            }
            None => Err(McpError::invalid_request(
                format!("Unknown tool: {name}"),
                None,
            )),
        }
    }
}

/// Prompt arguments arrive as JSON; non-string values are rendered as JSON text
fn json_map_to_string_map(args: &serde_json::Map<String, Value>) -> PromptArguments {
    let mut prompt_args = HashMap::new();
    for (key, value) in args {
        let value_str = match value {
            Value::String(s) => s.clone(),
            Value::Null => continue,
            v => v.to_string(),
        };
        prompt_args.insert(key.clone(), value_str);
    }
    prompt_args
}

impl ServerHandler for McpServer {
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            prompts: self.prompt_registry.list_prompts(),
            next_cursor: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        self.render_prompt(
            &request.name,
            request.arguments.as_ref(),
            chrono::Local::now().naive_local(),
        )
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.run_tool(&request.name, request.arguments).await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                prompts: Some(PromptsCapability {
                    list_changed: Some(false),
                }),
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: None,
                logging: None,
                completions: None,
                experimental: None,
            },
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: VERSION.into(),
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}
