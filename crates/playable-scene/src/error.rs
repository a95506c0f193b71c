//! Error types for the presentation core.
//!
//! Only illegal state requests surface as errors. Missing assets and audio
//! failures are logged and swallowed where they happen.

use thiserror::Error;

use crate::scene::SceneKind;

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;

/// Errors returned to callers of the scene host and the shell.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// A scene kind name did not match any known kind.
    #[error("unknown scene kind: {0}")]
    UnknownSceneKind(String),

    /// The kind is known but no factory was registered for it.
    #[error("no scene registered for kind {0}")]
    SceneNotRegistered(SceneKind),
}
