//! Capacities tools, grouped by noun with one submodule per verb
//!
//! Each tool module holds the MCP wrapper, the request shaping for its
//! endpoint, and a `description.md` served verbatim as the tool description.

pub mod daily_notes;
pub mod search;
pub mod spaces;
pub mod weblinks;
