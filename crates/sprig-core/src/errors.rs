//! Error types for sprig.

use thiserror::Error;

/// Result type alias for invocation-level operations.
pub type Result<T> = std::result::Result<T, SprigError>;

/// Invocation-level failures.
///
/// Problems with a single node never surface here; they become
/// [`Warning`](crate::artifact::Warning)s instead.
#[derive(Debug, Error)]
pub enum SprigError {
    #[error("Empty selection: select at least one visible layer")]
    EmptySelection,

    #[error("Invalid scene: {0}")]
    InvalidScene(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Unknown palette: {name}")]
    UnknownPalette { name: String },
}
