//! Model Context Protocol (MCP) server support
//!
//! This module exposes the Capacities API as MCP tools and a handful of
//! note-formatting prompts.

// Module declarations
pub mod prompts;
pub mod responses;
pub mod server;
pub mod tool_registry;
pub mod tools;
pub mod types;
pub mod validation;


// Re-export commonly used items from submodules
pub use prompts::{register_capacities_prompts, PromptRegistry, PromptTemplate};
pub use server::McpServer;
pub use tool_registry::{register_capacities_tools, McpTool, ToolContext, ToolRegistry};
pub use types::{
    DailyNoteOrigin, GetSpaceInfoRequest, ListSpacesRequest, SaveToDailyNoteRequest,
    SaveWeblinkRequest, SearchMode, SearchRequest,
};
