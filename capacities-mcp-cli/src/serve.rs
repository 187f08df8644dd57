use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_ERROR;
use capacities_mcp::mcp::McpServer;
use capacities_mcp::{ApiConfig, CredentialSource, EnvCredentials};
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use tokio_util::sync::CancellationToken;

/// Serve the Capacities tools over stdio until the client leaves or Ctrl-C.
///
/// A missing API key does not stop the server; each tool call reports it.
pub async fn run_server() -> CliResult<()> {
    let config = ApiConfig::from_env();
    config.validate().map_err(CliError::configuration)?;

    if let Err(e) = EnvCredentials::new().api_key() {
        tracing::warn!("{}; tool calls will fail until it is set", e);
    }

    let server = McpServer::from_env();
    tracing::info!(
        base_url = %config.base_url,
        tools = server.tool_registry().len(),
        "MCP server initialized"
    );

    let ct = CancellationToken::new();
    let ct_clone = ct.clone();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => {
                tracing::error!("Failed to listen for ctrl+c: {}", e);
                return;
            }
        }
        ct_clone.cancel();
    });

    let running = serve_server(server, stdio())
        .await
        .map_err(|e| CliError::new(format!("MCP server error: {e}"), EXIT_ERROR))?;
    tracing::info!("MCP server started successfully");

    tokio::select! {
        _ = ct.cancelled() => {
            tracing::info!("MCP server stopped by signal");
        }
        quit = running.waiting() => {
            match quit {
                Ok(_) => tracing::info!("MCP client disconnected"),
                Err(e) => return Err(CliError::general(e)),
            }
        }
    }

    tracing::info!("MCP server exited successfully");
    Ok(())
}
