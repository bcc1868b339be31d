//! Error types for slsgen-core.

use thiserror::Error;

/// All errors that can arise from parameter validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required parameter was not supplied on the command line.
    #[error("missing required parameter: {name}")]
    MissingParameter { name: &'static str },

    /// A parameter was supplied but resolved to the empty string.
    #[error("parameter {name} must not be empty")]
    EmptyParameter { name: &'static str },

    /// The application id contains characters that cannot appear in a
    /// service name or DynamoDB table-name prefix.
    #[error("invalid application id '{value}': only letters, digits, '_' and '-' are allowed")]
    InvalidAppId { value: String },

    /// The database port is not an integer in 1-65535.
    #[error("invalid database port '{value}': expected an integer in 1-65535")]
    InvalidPort { value: String },
}
