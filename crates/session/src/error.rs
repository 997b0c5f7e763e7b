use civilcrm_core::error::CoreError;
use civilcrm_store::StoreError;

/// Anything a session operation can fail with: domain validation and
/// lookups from the core, infrastructure failures from the store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// The message to surface in the UI.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Core(err) => err.user_message(),
            SessionError::Store(_) => "Connection problem, please try again".to_string(),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
