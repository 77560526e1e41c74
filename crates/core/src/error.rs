//! Failure taxonomy shared by the collector, the client and the renderer.
//!
//! Every variant ends up as an error layout in the output area; the
//! dispatcher never lets one escape.

/// The broad class a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Remote,
    Transport,
    UnknownAction,
    Render,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssistantError {
    /// A required input is missing. Raised before any network call.
    #[error("{0}")]
    Validation(String),
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Remote { status: u16, message: String },
    /// The request never produced a usable body: connection failure,
    /// invalid JSON, or JSON that does not match the action's shape.
    #[error("{0}")]
    Transport(String),
    #[error("Unknown action: '{0}'")]
    UnknownAction(String),
    #[error("Failed to render output: {0}")]
    Render(String),
}

impl AssistantError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssistantError::Validation(_) => ErrorKind::Validation,
            AssistantError::Remote { .. } => ErrorKind::Remote,
            AssistantError::Transport(_) => ErrorKind::Transport,
            AssistantError::UnknownAction(_) => ErrorKind::UnknownAction,
            AssistantError::Render(_) => ErrorKind::Render,
        }
    }
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        AssistantError::Transport(err.to_string())
    }
}

impl From<askama::Error> for AssistantError {
    fn from(err: askama::Error) -> Self {
        AssistantError::Render(err.to_string())
    }
}
