//! Parameter model for descriptor generation.
//!
//! The CLI collects every flag as optional ([`RawParams`]); validation at
//! construction turns that into a [`GeneratorConfig`] whose fields are
//! guaranteed non-empty. All defaults live here as named constants.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Runtime emitted when `--runtime` is omitted.
pub const DEFAULT_RUNTIME: &str = "nodejs10.x";

/// Runtime value that selects the legacy function layout.
pub const LEGACY_RUNTIME: &str = "python3.6";

/// Output file written when `--outputPath` is omitted.
pub const DEFAULT_OUTPUT_PATH: &str = "serverless.yaml";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed application id — the service name and the prefix for
/// every derived table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppId(pub String);

impl AppId {
    /// `<app_id>_<suffix>` — derived table name for the environment block.
    pub fn table_name(&self, suffix: &str) -> String {
        format!("{}_{}", self.0, suffix)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for AppId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AppId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed runtime identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Runtime(pub String);

impl Runtime {
    /// Whether this runtime selects the legacy function layout.
    pub fn is_legacy(&self) -> bool {
        self.0 == LEGACY_RUNTIME
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self(DEFAULT_RUNTIME.to_owned())
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Runtime {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Runtime {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// Database connection parameters embedded into the provider environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: String,
    pub name: String,
    pub username: String,
    pub password: String,
}

/// Validated parameter set consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub app_id: AppId,
    pub runtime: Runtime,
    pub database: DatabaseConfig,
    pub output_path: PathBuf,
}

/// Raw parameter set as collected from the command line, prior to validation.
///
/// Every field is optional here; [`RawParams::validate`] decides what is
/// actually required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    pub app_id: Option<String>,
    pub runtime: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub output_path: Option<PathBuf>,
}

fn require(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    let value = value.ok_or(ConfigError::MissingParameter { name })?;
    if value.is_empty() {
        return Err(ConfigError::EmptyParameter { name });
    }
    Ok(value)
}

fn valid_app_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

impl RawParams {
    /// Validate into a [`GeneratorConfig`].
    ///
    /// Applies [`DEFAULT_RUNTIME`] and [`DEFAULT_OUTPUT_PATH`] where the
    /// corresponding field is absent; rejects a missing or empty app id or
    /// database field, an app id outside `[A-Za-z0-9_-]`, and a port that
    /// is not an integer in 1-65535.
    pub fn validate(self) -> Result<GeneratorConfig, ConfigError> {
        let app_id = require(self.app_id, "appId")?;
        if !app_id.chars().all(valid_app_id_char) {
            return Err(ConfigError::InvalidAppId { value: app_id });
        }

        let runtime = match self.runtime {
            Some(r) if r.is_empty() => {
                return Err(ConfigError::EmptyParameter { name: "runtime" })
            }
            Some(r) => Runtime(r),
            None => Runtime::default(),
        };

        let port = require(self.port, "port")?;
        match port.parse::<u16>() {
            Ok(p) if p > 0 => {}
            _ => return Err(ConfigError::InvalidPort { value: port }),
        }

        let database = DatabaseConfig {
            host: require(self.host, "host")?,
            port,
            name: require(self.name, "name")?,
            username: require(self.username, "username")?,
            password: require(self.password, "password")?,
        };

        Ok(GeneratorConfig {
            app_id: AppId(app_id),
            runtime,
            database,
            output_path: self
                .output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
