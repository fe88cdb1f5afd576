use crate::error::BackendError;
use crate::store::ChatStore;

impl ChatStore {
    /// Sends `text` to `contact_id`. The cache is left alone either way;
    /// callers reload history or update their own view after success.
    pub async fn send(&self, contact_id: &str, text: &str) -> Result<(), BackendError> {
        log::debug!("send to {contact_id} ({} bytes)", text.len());
        self.backend
            .send_message(contact_id, text)
            .await
            .inspect_err(|e| log::error!("send to {contact_id} failed: {e}"))
    }
}
