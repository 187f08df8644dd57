//! Type definitions for the doctor module

/// Status of a diagnostic check
#[derive(Debug, PartialEq, Clone)]
pub enum CheckStatus {
    /// Check passed without issues
    Ok,
    /// Check passed but with potential issues
    Warning,
    /// Check failed with errors
    Error,
}

/// Section a check is printed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCategory {
    /// Installation and PATH
    System,
    /// Environment variables and settings
    Configuration,
    /// Live requests against the API
    Connectivity,
}

impl CheckCategory {
    /// All categories in print order
    pub const ALL: [CheckCategory; 3] = [
        CheckCategory::System,
        CheckCategory::Configuration,
        CheckCategory::Connectivity,
    ];

    /// Heading printed above the category
    pub fn heading(&self) -> &'static str {
        match self {
            CheckCategory::System => "System Checks:",
            CheckCategory::Configuration => "Configuration:",
            CheckCategory::Connectivity => "Connectivity:",
        }
    }
}

/// Exit codes for the doctor command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// All checks passed
    Success = 0,
    /// Warnings detected
    Warning = 1,
    /// Errors detected
    Error = 2,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Result of a single diagnostic check
#[derive(Debug, Clone)]
pub struct Check {
    /// Name of the check performed
    pub name: String,
    /// Section the check belongs to
    pub category: CheckCategory,
    /// Status of the check (Ok, Warning, Error)
    pub status: CheckStatus,
    /// Descriptive message about the check result
    pub message: String,
    /// Optional fix suggestion for warnings or errors
    pub fix: Option<String>,
}

impl Check {
    /// Create a new Check with builder pattern
    ///
    /// # Example
    ///
    /// ```
    /// use capacities_mcp_cli::doctor::{Check, CheckCategory, CheckStatus};
    ///
    /// let check = Check::new("API key", CheckCategory::Configuration, CheckStatus::Ok)
    ///     .with_message("CAPACITIES_API_KEY is set")
    ///     .build();
    /// assert!(check.fix.is_none());
    /// ```
    pub fn new(name: impl Into<String>, category: CheckCategory, status: CheckStatus) -> CheckBuilder {
        CheckBuilder {
            name: name.into(),
            category,
            status,
            message: String::new(),
            fix: None,
        }
    }
}

/// Builder for creating Check instances
pub struct CheckBuilder {
    name: String,
    category: CheckCategory,
    status: CheckStatus,
    message: String,
    fix: Option<String>,
}

impl CheckBuilder {
    /// Set the message for this check
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the fix suggestion for this check
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    /// Build the Check instance
    pub fn build(self) -> Check {
        Check {
            name: self.name,
            category: self.category,
            status: self.status,
            message: self.message,
            fix: self.fix,
        }
    }
}

/// Count of checks by status
pub(crate) struct CheckCounts {
    pub ok_count: usize,
    pub warning_count: usize,
    pub error_count: usize,
}
