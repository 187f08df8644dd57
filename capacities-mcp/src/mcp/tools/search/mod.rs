//! Content search tools

pub mod query;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all search-related tools with the registry
pub fn register_search_tools(registry: &mut ToolRegistry) {
    registry.register(query::SearchTool::new());
}
