use crate::types::RecordId;

/// Domain-level error type.
///
/// `Validation` carries the exact human-readable message shown to the
/// user; it is produced before any store mutation is attempted.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: RecordId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message to surface in the UI, without the error-kind prefix.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::NotFound { entity, id } => format!("{entity} {id} no longer exists"),
            CoreError::Validation(msg) => msg.clone(),
            CoreError::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}
