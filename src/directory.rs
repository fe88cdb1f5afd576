use crate::api::models::RemoteContact;
use crate::error::BackendError;
use crate::state::Contact;
use crate::store::ChatStore;

/// Maps backend entries to directory records. Unread counts and previews are
/// not tracked here, so they always start out empty.
pub fn shape_contacts(remote: Vec<RemoteContact>) -> Vec<Contact> {
    remote
        .into_iter()
        .map(|c| Contact {
            id: c.id,
            name: c.name,
            unread: 0,
            last: String::new(),
        })
        .collect()
}

impl ChatStore {
    /// Fetches the contact list and replaces the whole directory with it.
    pub async fn load_contacts(&self) -> Result<(), BackendError> {
        let ticket = self.next_ticket();
        let remote = self.backend.list_contacts().await?;
        log::debug!("directory: {} contacts", remote.len());
        self.apply_contacts(ticket, shape_contacts(remote)).await;
        Ok(())
    }
}
