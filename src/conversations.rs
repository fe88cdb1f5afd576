use crate::api::models::RemoteMessage;
use crate::error::BackendError;
use crate::state::Message;
use crate::store::ChatStore;
use crate::time::normalize_opt;

/// Builds the cached form of one page of history. The owning contact is the
/// one that was asked for; the payload is never consulted for it.
pub fn shape_history(contact_id: &str, raw: Vec<RemoteMessage>) -> Vec<Message> {
    raw.into_iter()
        .map(|m| Message {
            timestamp: normalize_opt(m.at.as_ref()),
            id: m.id,
            contact_id: contact_id.to_string(),
            text: m.text,
            mine: m.out,
        })
        .collect()
}

impl ChatStore {
    /// Replaces the cached conversation for `contact_id` with the page at
    /// `offset`, in backend order. Pages are not merged.
    pub async fn load_history(&self, contact_id: &str, offset: u32) -> Result<(), BackendError> {
        let ticket = self.next_ticket();
        let raw = self.backend.list_messages(contact_id, offset).await?;
        log::debug!("history {contact_id}@{offset}: {} messages", raw.len());
        self.apply_conversation(ticket, contact_id, shape_history(contact_id, raw))
            .await;
        Ok(())
    }
}
