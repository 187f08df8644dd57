//! Capacities MCP CLI Library
//!
//! Command-line definitions, logging setup and diagnostics for the
//! `capacities-mcp` binary.

/// Command-line interface definitions and argument parsing
pub mod cli;
/// Shell completion generation
pub mod completions;
/// Configuration and connectivity diagnostics
pub mod doctor;
/// CLI error type carrying an exit code
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Log destination setup, including the MCP-mode log file
pub mod logging;
/// The stdio MCP server command
pub mod serve;
