//! Check implementations for the doctor module

use super::types::*;
use capacities_mcp::config::{API_BASE_URL, API_KEY_ENV_VAR};
use capacities_mcp::{ApiClient, ApiConfig, CredentialSource, RequestOptions};
use std::env;
use std::path::PathBuf;

/// Check names constants to avoid typos and improve maintainability
pub mod check_names {
    pub const IN_PATH: &str = "capacities-mcp in PATH";
    pub const API_KEY: &str = "API key";
    pub const BASE_URL: &str = "API base URL";
    pub const API_ACCESS: &str = "Capacities API access";
}

const EXE_NAME: &str = "capacities-mcp";

/// Look for the binary on `PATH` so MCP clients can launch it by name
pub fn check_in_path(checks: &mut Vec<Check>) {
    let path_var = env::var("PATH").unwrap_or_default();
    let found: Option<PathBuf> = env::split_paths(&path_var)
        .map(|dir| dir.join(EXE_NAME))
        .find(|candidate| candidate.exists());

    let check = match found {
        Some(path) => Check::new(check_names::IN_PATH, CheckCategory::System, CheckStatus::Ok)
            .with_message(format!("Found at: {path:?}")),
        None => Check::new(
            check_names::IN_PATH,
            CheckCategory::System,
            CheckStatus::Warning,
        )
        .with_message(format!("{EXE_NAME} not found in PATH"))
        .with_fix(format!(
            "Add {EXE_NAME} to your PATH or use the full path in your MCP client config"
        )),
    };
    checks.push(check.build());
}

/// Require a credential; returns whether one is available
pub fn check_api_key(checks: &mut Vec<Check>, credentials: &dyn CredentialSource) -> bool {
    match credentials.api_key() {
        Ok(key) => {
            checks.push(
                Check::new(
                    check_names::API_KEY,
                    CheckCategory::Configuration,
                    CheckStatus::Ok,
                )
                .with_message(format!("{API_KEY_ENV_VAR} is set ({} characters)", key.len()))
                .build(),
            );
            true
        }
        Err(e) => {
            checks.push(
                Check::new(
                    check_names::API_KEY,
                    CheckCategory::Configuration,
                    CheckStatus::Error,
                )
                .with_message(e.to_string())
                .with_fix(format!(
                    "Create an API token in the Capacities desktop app and export {API_KEY_ENV_VAR}, or put it in a .env file"
                ))
                .build(),
            );
            false
        }
    }
}

/// Validate the configured base URL; returns whether it is usable
pub fn check_base_url(checks: &mut Vec<Check>, config: &ApiConfig) -> bool {
    let validation = config.validate();
    let usable = validation.is_ok();
    let check = match validation {
        Ok(()) if config.base_url == API_BASE_URL => Check::new(
            check_names::BASE_URL,
            CheckCategory::Configuration,
            CheckStatus::Ok,
        )
        .with_message(format!("Using {}", config.base_url)),
        Ok(()) => Check::new(
            check_names::BASE_URL,
            CheckCategory::Configuration,
            CheckStatus::Warning,
        )
        .with_message(format!("Overridden to {}", config.base_url))
        .with_fix("Unset CAPACITIES_API_BASE_URL unless you are testing against another server"),
        Err(e) => Check::new(
            check_names::BASE_URL,
            CheckCategory::Configuration,
            CheckStatus::Error,
        )
        .with_message(e.to_string())
        .with_fix("Set CAPACITIES_API_BASE_URL to an http(s) URL or unset it"),
    };
    checks.push(check.build());
    usable
}

/// Call `/spaces` once to prove the key is accepted
pub async fn check_connectivity(checks: &mut Vec<Check>, client: &ApiClient) {
    let check = match client.execute("/spaces", RequestOptions::get()).await {
        Ok(response) => Check::new(
            check_names::API_ACCESS,
            CheckCategory::Connectivity,
            CheckStatus::Ok,
        )
        .with_message(format!(
            "{} answered with {}",
            client.config().base_url,
            response.status()
        )),
        Err(e) if matches!(e.api_status(), Some(401) | Some(403)) => Check::new(
            check_names::API_ACCESS,
            CheckCategory::Connectivity,
            CheckStatus::Error,
        )
        .with_message(e.to_string())
        .with_fix(format!("The API key was rejected; create a new token and update {API_KEY_ENV_VAR}")),
        Err(e) if e.api_status() == Some(429) => Check::new(
            check_names::API_ACCESS,
            CheckCategory::Connectivity,
            CheckStatus::Warning,
        )
        .with_message(e.to_string())
        .with_fix("Rate limited; wait a minute and run doctor again"),
        Err(e) => Check::new(
            check_names::API_ACCESS,
            CheckCategory::Connectivity,
            CheckStatus::Error,
        )
        .with_message(e.to_string())
        .with_fix("Check your network connection and the API base URL"),
    };
    checks.push(check.build());
}

/// Record that the live check did not run
pub fn skip_connectivity(checks: &mut Vec<Check>, reason: &str) {
    checks.push(
        Check::new(
            check_names::API_ACCESS,
            CheckCategory::Connectivity,
            CheckStatus::Warning,
        )
        .with_message(format!("Skipped: {reason}"))
        .build(),
    );
}
