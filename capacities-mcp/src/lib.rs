//! # Capacities MCP
//!
//! Model Context Protocol tools and prompts for the Capacities note-taking API.
//!
//! ## Features
//!
//! - **API Client**: Authenticated requests against the Capacities REST API
//! - **Tools**: List spaces, inspect a space, search, save weblinks, append to the daily note
//! - **Prompts**: Templates that format daily summaries, research notes and meeting notes
//! - **MCP Support**: A stdio-ready `rmcp` server handler wiring it all together
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use capacities_mcp::{ApiClient, RequestOptions};
//!
//! # async fn run() -> capacities_mcp::Result<()> {
//! // Reads CAPACITIES_API_KEY on every request
//! let client = ApiClient::from_env();
//! let response = client.execute("/spaces", RequestOptions::get()).await?;
//! let spaces = response.json().await?;
//! println!("{}", serde_json::to_string_pretty(&spaces)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Credential access and API configuration
pub mod config;

/// Error types used throughout the library
pub mod error;

/// Authenticated request executor for the Capacities API
pub mod api;

/// Model Context Protocol (MCP) server support
pub mod mcp;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::{ApiClient, ApiResponse, RequestOptions};
pub use config::{ApiConfig, CredentialSource, EnvCredentials, StaticCredentials};
pub use error::{CapacitiesError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
