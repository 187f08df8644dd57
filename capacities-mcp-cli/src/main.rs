use capacities_mcp_cli::cli::{Cli, Commands};
use capacities_mcp_cli::doctor::Doctor;
use capacities_mcp_cli::error::handle_cli_result;
use capacities_mcp_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use capacities_mcp_cli::{completions, logging, serve};
use clap::CommandFactory;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Fast path for help - avoid initialization
    if cli.command.is_none() {
        let code = match Cli::command().print_help() {
            Ok(()) => EXIT_SUCCESS,
            Err(_) => EXIT_WARNING,
        };
        process::exit(code);
    }

    // A .env file is optional; real environment variables take precedence
    dotenv::dotenv().ok();

    let is_mcp_mode = cli.is_mcp_mode();
    let log_level = logging::log_level(is_mcp_mode, cli.quiet, cli.debug, cli.verbose);
    logging::init_logging(log_level, is_mcp_mode);

    let exit_code = match cli.command {
        Some(Commands::Serve) => {
            tracing::info!("Starting MCP server");
            handle_cli_result(serve::run_server().await)
        }
        Some(Commands::Doctor) => {
            tracing::info!("Running diagnostics");
            run_doctor().await
        }
        Some(Commands::Completion { shell }) => {
            tracing::info!("Generating completion for {:?}", shell);
            run_completions(shell)
        }
        None => EXIT_SUCCESS,
    };

    process::exit(exit_code);
}

async fn run_doctor() -> i32 {
    let mut doctor = Doctor::new();
    match doctor.run_diagnostics().await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!("Doctor error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_completions(shell: clap_complete::Shell) -> i32 {
    match completions::print_completion(shell) {
        Ok(_) => EXIT_SUCCESS,
        Err(e) => {
            tracing::error!("Completion error: {}", e);
            EXIT_WARNING
        }
    }
}
