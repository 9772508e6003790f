use thiserror::Error;

/// Errors raised by the dispatch decision engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The payload carried a recognizable shape but no usable target
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// None of the supported payload shapes matched
    #[error("Invalid coordinates: unrecognized request shape ({0})")]
    UnrecognizedShape(String),

    #[error("No launch sites configured")]
    RegistryEmpty,

    #[error("Duplicate launch site identifier: {0}")]
    DuplicateSite(String),

    #[error("Invalid planner settings: {0}")]
    InvalidSettings(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// True for failures caused by the caller's payload (client errors)
    pub fn is_invalid_coordinates(&self) -> bool {
        matches!(
            self,
            DispatchError::InvalidCoordinates(_) | DispatchError::UnrecognizedShape(_)
        )
    }
}
