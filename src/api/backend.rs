use async_trait::async_trait;

use crate::api::models::{RemoteContact, RemoteMessage};
use crate::error::BackendError;

/// The three remote calls the cache is built on.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_contacts(&self) -> Result<Vec<RemoteContact>, BackendError>;
    async fn list_messages(
        &self,
        contact_id: &str,
        offset: u32,
    ) -> Result<Vec<RemoteMessage>, BackendError>;
    async fn send_message(&self, contact_id: &str, text: &str) -> Result<(), BackendError>;
}
