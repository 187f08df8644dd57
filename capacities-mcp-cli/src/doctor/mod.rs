//! Doctor module for Capacities MCP diagnostics
//!
//! Checks that the binary can be found, that an API key and a usable base
//! URL are configured, and that the Capacities API accepts the key.
//!
//! # Usage
//!
//! ```no_run
//! use capacities_mcp_cli::doctor::Doctor;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let mut doctor = Doctor::new();
//! let exit_code = doctor.run_diagnostics().await?;
//! # Ok(())
//! # }
//! ```
//!
//! The doctor returns exit codes:
//! - 0: All checks passed
//! - 1: Some warnings detected
//! - 2: Errors detected

use anyhow::Result;
use capacities_mcp::{ApiClient, ApiConfig, CredentialSource, EnvCredentials};
use colored::*;
use std::sync::Arc;

// Re-export types from submodules
pub use types::*;

pub mod checks;
pub mod types;

/// Main diagnostic tool for Capacities MCP setup checks
///
/// The Doctor struct accumulates diagnostic results and provides a summary
/// of the configuration and any potential issues.
pub struct Doctor {
    checks: Vec<Check>,
}

impl Doctor {
    /// Create a new Doctor instance for running diagnostics
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Run all diagnostic checks against the environment configuration and print them
    pub async fn run_diagnostics(&mut self) -> Result<i32> {
        println!("{}", "Capacities MCP Doctor".bold().blue());
        println!("{}", "Running diagnostics...".dimmed());
        println!();

        let credentials: Arc<dyn CredentialSource> = Arc::new(EnvCredentials::new());
        self.run_checks(ApiConfig::from_env(), credentials).await;

        self.print_results();

        Ok(self.get_exit_code())
    }

    /// Run every check with explicit configuration, without printing
    pub async fn run_checks(&mut self, config: ApiConfig, credentials: Arc<dyn CredentialSource>) {
        checks::check_in_path(&mut self.checks);

        let has_key = checks::check_api_key(&mut self.checks, credentials.as_ref());
        let url_ok = checks::check_base_url(&mut self.checks, &config);

        match (has_key, url_ok) {
            (true, true) => {
                let client = ApiClient::new(config, credentials);
                checks::check_connectivity(&mut self.checks, &client).await;
            }
            (false, _) => checks::skip_connectivity(&mut self.checks, "no API key"),
            (true, false) => checks::skip_connectivity(&mut self.checks, "invalid base URL"),
        }
    }

    /// The checks collected so far
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Print the results
    ///
    /// Results are grouped by category and color-coded by status.
    pub fn print_results(&self) {
        let use_color = crate::cli::Cli::should_use_color();

        for category in CheckCategory::ALL {
            let checks: Vec<&Check> = self
                .checks
                .iter()
                .filter(|c| c.category == category)
                .collect();
            self.print_check_category(&checks, category.heading(), use_color);
        }

        self.print_summary(use_color);
    }

    /// Print a category of checks
    fn print_check_category(&self, checks: &[&Check], category_name: &str, use_color: bool) {
        if !checks.is_empty() {
            if use_color {
                println!("{}", category_name.bold().yellow());
            } else {
                println!("{category_name}");
            }
            for check in checks {
                print_check(check, use_color);
            }
            println!();
        }
    }

    /// Print the summary of check results
    fn print_summary(&self, use_color: bool) {
        let counts = self.count_check_statuses();

        if use_color {
            println!("{}", "Summary:".bold().green());
        } else {
            println!("Summary:");
        }

        match (counts.error_count, counts.warning_count) {
            (0, 0) => println!("  All checks passed!"),
            (0, _) => {
                if use_color {
                    println!(
                        "  {} checks passed, {} warnings",
                        counts.ok_count.to_string().green(),
                        counts.warning_count.to_string().yellow()
                    );
                } else {
                    println!(
                        "  {} checks passed, {} warnings",
                        counts.ok_count, counts.warning_count
                    );
                }
            }
            _ => {
                if use_color {
                    println!(
                        "  {} checks passed, {} warnings, {} errors",
                        counts.ok_count.to_string().green(),
                        counts.warning_count.to_string().yellow(),
                        counts.error_count.to_string().red()
                    );
                } else {
                    println!(
                        "  {} checks passed, {} warnings, {} errors",
                        counts.ok_count, counts.warning_count, counts.error_count
                    );
                }
            }
        }
    }

    /// Count checks by status
    fn count_check_statuses(&self) -> CheckCounts {
        let count = |status: CheckStatus| self.checks.iter().filter(|c| c.status == status).count();
        CheckCounts {
            ok_count: count(CheckStatus::Ok),
            warning_count: count(CheckStatus::Warning),
            error_count: count(CheckStatus::Error),
        }
    }

    /// Get exit code based on check results
    ///
    /// # Returns
    ///
    /// - 0: All checks passed (no errors or warnings)
    /// - 1: At least one warning detected
    /// - 2: At least one error detected
    pub fn get_exit_code(&self) -> i32 {
        let has_error = self.checks.iter().any(|c| c.status == CheckStatus::Error);
        let has_warning = self.checks.iter().any(|c| c.status == CheckStatus::Warning);

        let exit_code = if has_error {
            ExitCode::Error
        } else if has_warning {
            ExitCode::Warning
        } else {
            ExitCode::Success
        };

        exit_code.into()
    }
}

impl Default for Doctor {
    fn default() -> Self {
        Self::new()
    }
}

/// Print a single check result
fn print_check(check: &Check, use_color: bool) {
    let (symbol, color_fn): (&str, fn(&str) -> ColoredString) = match check.status {
        CheckStatus::Ok => ("✓", |s: &str| s.green()),
        CheckStatus::Warning => ("⚠", |s: &str| s.yellow()),
        CheckStatus::Error => ("✗", |s: &str| s.red()),
    };

    if use_color {
        println!(
            "  {} {} - {}",
            color_fn(symbol),
            check.name.bold(),
            check.message
        );
    } else {
        println!("  {} {} - {}", symbol, check.name, check.message);
    }

    if let Some(fix) = &check.fix {
        if use_color {
            println!("    {} {}", "→".dimmed(), fix.dimmed());
        } else {
            println!("    → {fix}");
        }
    }
}
