//! Daily note tools
//!
//! Capacities keeps one daily note per day and space; these tools append to
//! today's note instead of creating new objects.

pub mod save;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all daily-note tools with the registry
pub fn register_daily_note_tools(registry: &mut ToolRegistry) {
    registry.register(save::SaveToDailyNoteTool::new());
}
