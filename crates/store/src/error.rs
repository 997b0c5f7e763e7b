/// Failures at the store boundary.
///
/// These are infrastructure failures, distinct from domain validation:
/// they surface after a write was attempted, or when a subscription
/// cannot be established.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend is unreachable or refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The caller may not read or write this path.
    #[error("Permission denied for path: {path}")]
    PermissionDenied { path: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
