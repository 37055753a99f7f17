use thiserror::Error;

use crate::host::ElementId;

/// Errors raised while provisioning or driving card scenes
#[derive(Debug, Error)]
pub enum SceneError {
    /// The rendering context for one container could not be acquired
    #[error("rendering context unavailable for container {container}: {reason}")]
    ContextUnavailable { container: ElementId, reason: String },

    /// The render context refused to hand out another renderer
    #[error("rendering context refused: {reason}")]
    ContextRefused { reason: String },

    /// A render call failed
    #[error("render failed: {reason}")]
    Render { reason: String },

    /// The window surface could not be created or presented to
    #[error("presentation surface error: {0}")]
    Surface(String),

    /// The animation driver was asked to start a second time
    #[error("animation driver already started")]
    DriverAlreadyStarted,

    /// Configuration values are out of range
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
