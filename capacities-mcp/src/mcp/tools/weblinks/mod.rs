//! Weblink tools

pub mod save;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all weblink-related tools with the registry
pub fn register_weblink_tools(registry: &mut ToolRegistry) {
    registry.register(save::SaveWeblinkTool::new());
}
