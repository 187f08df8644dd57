//! Space discovery tools
//!
//! Spaces are the top-level containers in Capacities. Most other tools need a
//! space UUID, which these tools surface.

pub mod info;
pub mod list;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all space-related tools with the registry
pub fn register_spaces_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListSpacesTool::new());
    registry.register(info::GetSpaceInfoTool::new());
}
