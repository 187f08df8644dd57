//! Unified error handling for the Capacities MCP library
//!
//! Every failure the request executor or a tool can produce is a variant of
//! [`CapacitiesError`], so callers match on the kind of failure instead of
//! inspecting message text.

use thiserror::Error;

/// Result type alias for Capacities operations
pub type Result<T> = std::result::Result<T, CapacitiesError>;

/// The main error type for the Capacities MCP library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CapacitiesError {
    /// A required configuration value is missing or empty
    #[error("{variable} environment variable is required")]
    Configuration {
        /// Name of the missing environment variable
        variable: String,
    },

    /// The API answered with a non-success status
    #[error("Capacities API error: {status} {status_text} - {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status; empty for codes without one (e.g. 599)
        status_text: String,
        /// Response body text
        body: String,
    },

    /// The request could not be sent or the response could not be read
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// A response expected to carry JSON did not
    #[error("Invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),

    /// A caller-supplied header name or value cannot be sent
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A tool argument violated its constraints
    #[error("Invalid value for '{field}': {reason}")]
    Validation {
        /// Argument name as exposed in the tool schema
        field: String,
        /// What was wrong with it
        reason: String,
    },

    /// A prompt was requested without one of its required arguments
    #[error("Missing required argument '{name}'")]
    MissingArgument {
        /// Argument name as advertised by the prompt
        name: String,
    },

    /// A tool operation failed; wraps the underlying cause
    #[error("Failed to {operation}: {source}")]
    Operation {
        /// Human readable operation name, e.g. "list spaces"
        operation: &'static str,
        /// The underlying error
        #[source]
        source: Box<CapacitiesError>,
    },
}

impl CapacitiesError {
    /// Create a validation error for the given field
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Wrap an error with the name of the operation that failed
    pub fn operation(operation: &'static str, source: CapacitiesError) -> Self {
        Self::Operation {
            operation,
            source: Box::new(source),
        }
    }

    /// Returns true if this error (or the error it wraps) is a missing credential
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration { .. } => true,
            Self::Operation { source, .. } => source.is_configuration(),
            _ => false,
        }
    }

    /// Returns the upstream HTTP status if this error (or the error it wraps) came from the API
    pub fn api_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Operation { source, .. } => source.api_status(),
            _ => None,
        }
    }
}

/// Extension trait for tagging results with the operation that produced them
pub trait OperationResultExt<T> {
    /// Wrap any error as `Failed to <operation>: <error>`
    fn for_operation(self, operation: &'static str) -> Result<T>;
}

impl<T> OperationResultExt<T> for Result<T> {
    fn for_operation(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| CapacitiesError::operation(operation, e))
    }
}
