use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::io;

#[derive(Parser, Debug)]
#[command(name = "capacities-mcp")]
#[command(version)]
#[command(about = "An MCP server for the Capacities note-taking app")]
#[command(long_about = "
capacities-mcp is an MCP (Model Context Protocol) server that lets AI
assistants list your Capacities spaces, search them, save weblinks and
append to your daily note.

The API key is read from CAPACITIES_API_KEY (a .env file in the working
directory is loaded if present).

Example usage:
  capacities-mcp serve     # Run as MCP server
  capacities-mcp doctor    # Check configuration and API access
  capacities-mcp completion bash > ~/.bashrc.d/capacities-mcp  # Generate bash completions
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server over stdio
    #[command(long_about = "
Runs capacities-mcp as an MCP server on stdin/stdout. The server exposes:

- capacities_list_spaces, capacities_get_space_info and capacities_search
- capacities_save_weblink and capacities_save_to_daily_note
- prompts for daily summaries, research notes and meeting notes

When stdin is not a terminal, logs go to ~/.capacities-mcp/mcp.log
(file name overridable with CAPACITIES_MCP_LOG_FILE).

Example:
  capacities-mcp serve
  # Or configure it as a stdio server in your MCP client
")]
    Serve,
    /// Diagnose configuration and API access
    #[command(long_about = "
Runs diagnostics to help troubleshoot setup issues.
The doctor command will check:

- If capacities-mcp is in your PATH
- That CAPACITIES_API_KEY is set
- That the API base URL is valid
- That the Capacities API accepts the key

Exit codes:
  0 - All checks passed
  1 - Warnings found
  2 - Errors found

Example:
  capacities-mcp doctor
")]
    Doctor,
    /// Generate shell completion scripts
    #[command(long_about = "
Generates shell completion scripts for various shells. Supports:
- bash
- zsh
- fish
- powershell

Examples:
  # Bash
  capacities-mcp completion bash > ~/.local/share/bash-completion/completions/capacities-mcp

  # Zsh
  capacities-mcp completion zsh > ~/.zfunc/_capacities-mcp

  # Fish
  capacities-mcp completion fish > ~/.config/fish/completions/capacities-mcp.fish
")]
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    pub fn is_tty() -> bool {
        io::stdout().is_terminal()
    }

    pub fn should_use_color() -> bool {
        Self::is_tty() && std::env::var("NO_COLOR").is_err()
    }

    /// True when serving over a pipe, where stdout belongs to the protocol
    pub fn is_mcp_mode(&self) -> bool {
        matches!(self.command, Some(Commands::Serve)) && !io::stdin().is_terminal()
    }
}
