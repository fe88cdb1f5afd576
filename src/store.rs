use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{watch, RwLock};

use crate::api::backend::Backend;
use crate::api::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::state::{ChatState, Contact, Message};

/// Cloneable handle to one conversation cache and the backend feeding it.
///
/// The lock is only taken once a backend call has resolved, so a failed
/// call never touches the state. Each load draws a ticket before calling the
/// backend; a response is applied only if no later-issued load for the same
/// target has been applied already.
#[derive(Clone)]
pub struct ChatStore {
    pub(crate) backend: Arc<dyn Backend>,
    shared: Arc<Shared>,
}

struct Shared {
    inner: RwLock<Inner>,
    tickets: AtomicU64,
    rev_tx: watch::Sender<u64>,
}

#[derive(Default)]
struct Inner {
    state: ChatState,
    directory_ticket: u64,
    history_tickets: HashMap<String, u64>,
}

impl ChatStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (rev_tx, _) = watch::channel(0);
        Self {
            backend,
            shared: Arc::new(Shared {
                inner: RwLock::new(Inner::default()),
                tickets: AtomicU64::new(0),
                rev_tx,
            }),
        }
    }

    pub fn with_backend<B: Backend + 'static>(backend: B) -> Self {
        Self::new(Arc::new(backend))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_backend(ApiClient::from_config(config)?))
    }

    pub async fn contacts(&self) -> Vec<Contact> {
        self.shared.inner.read().await.state.contacts().to_vec()
    }

    pub async fn conversation(&self, contact_id: &str) -> Option<Vec<Message>> {
        let inner = self.shared.inner.read().await;
        inner.state.conversation(contact_id).map(<[Message]>::to_vec)
    }

    pub async fn conversations(&self) -> HashMap<String, Vec<Message>> {
        self.shared.inner.read().await.state.conversations().clone()
    }

    pub async fn snapshot(&self) -> ChatState {
        self.shared.inner.read().await.state.clone()
    }

    /// Yields the state revision after every applied write.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.rev_tx.subscribe()
    }

    pub(crate) fn next_ticket(&self) -> u64 {
        self.shared.tickets.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) async fn apply_contacts(&self, ticket: u64, contacts: Vec<Contact>) -> bool {
        let mut inner = self.shared.inner.write().await;
        if ticket <= inner.directory_ticket {
            log::debug!("dropping stale directory response (ticket {ticket})");
            return false;
        }
        inner.directory_ticket = ticket;
        inner.state.replace_contacts(contacts);
        self.shared.rev_tx.send_replace(inner.state.rev());
        true
    }

    pub(crate) async fn apply_conversation(&self, ticket: u64, contact_id: &str, messages: Vec<Message>) -> bool {
        let mut inner = self.shared.inner.write().await;
        let last = inner.history_tickets.get(contact_id).copied().unwrap_or(0);
        if ticket <= last {
            log::debug!("dropping stale history for {contact_id} (ticket {ticket})");
            return false;
        }
        inner.history_tickets.insert(contact_id.to_string(), ticket);
        inner.state.replace_conversation(contact_id, messages);
        self.shared.rev_tx.send_replace(inner.state.rev());
        true
    }
}
