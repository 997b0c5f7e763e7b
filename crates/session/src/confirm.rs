//! Two-step record removal.
//!
//! Destructive actions never fire directly from a row control. The
//! service hands back a [`RemovalRequest`] carrying the confirmation
//! prompt; the store mutation happens only on [`confirm`].
//!
//! [`confirm`]: RemovalRequest::confirm

use std::sync::Arc;

use civilcrm_store::{RecordPath, RecordStore};
use tracing::info;

use crate::error::SessionResult;

/// A pending removal awaiting user confirmation.
pub struct RemovalRequest {
    store: Arc<dyn RecordStore>,
    target: RecordPath,
    prompt: String,
}

impl std::fmt::Debug for RemovalRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemovalRequest")
            .field("target", &self.target)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

impl RemovalRequest {
    pub(crate) fn new(store: Arc<dyn RecordStore>, target: RecordPath, prompt: String) -> Self {
        Self {
            store,
            target,
            prompt,
        }
    }

    /// The question to put to the user.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Carry out the removal.
    pub async fn confirm(self) -> SessionResult<()> {
        self.store.remove(&self.target).await?;
        info!(target = %self.target, "record removed");
        Ok(())
    }

    /// Abandon the request; the store is untouched.
    pub fn decline(self) {}
}
