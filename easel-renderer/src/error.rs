//! Error types for render operations.

use thiserror::Error;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a scene.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The scene rejected an operation mid-walk.
    #[error("scene error: {0}")]
    Scene(#[from] easel_core::SceneError),

    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}
