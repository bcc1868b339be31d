//! Error types for slsgen-renderer.

use thiserror::Error;

/// All errors that can arise from descriptor rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// YAML serialization error. Unreachable for a well-formed
    /// [`crate::ServerlessDescriptor`], but propagated rather than panicked.
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
