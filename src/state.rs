use std::collections::HashMap;

use serde::Serialize;

use crate::time::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Opaque backend token, used verbatim as the conversation key.
    pub id: String,
    pub name: String,
    pub unread: u32,
    pub last: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub contact_id: String,
    pub text: String,
    pub mine: bool,
    pub timestamp: Timestamp,
}

/// Everything the presentation layer can read. Only [`crate::ChatStore`]
/// writes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatState {
    rev: u64,
    contacts: Vec<Contact>,
    conversations: HashMap<String, Vec<Message>>,
}

impl ChatState {
    /// Bumped once per applied write.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn conversation(&self, contact_id: &str) -> Option<&[Message]> {
        self.conversations.get(contact_id).map(Vec::as_slice)
    }

    pub fn conversations(&self) -> &HashMap<String, Vec<Message>> {
        &self.conversations
    }

    pub(crate) fn replace_contacts(&mut self, contacts: Vec<Contact>) {
        self.contacts = contacts;
        self.rev += 1;
    }

    pub(crate) fn replace_conversation(&mut self, contact_id: &str, messages: Vec<Message>) {
        debug_assert!(messages.iter().all(|m| m.contact_id == contact_id));
        self.conversations.insert(contact_id.to_string(), messages);
        self.rev += 1;
    }
}
