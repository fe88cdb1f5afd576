//! Client-side conversation state for a messaging backend.
//!
//! [`ChatStore`] keeps the contact directory and one message list per
//! contact, filled from a [`Backend`]. Reads hand out clones; the only
//! writers are [`ChatStore::load_contacts`] and [`ChatStore::load_history`].

pub mod api;
pub mod config;
pub mod conversations;
pub mod directory;
pub mod error;
pub mod send;
pub mod state;
pub mod store;
pub mod time;
pub mod utils;

#[cfg(test)]
mod tests;

pub use api::backend::Backend;
pub use api::client::ApiClient;
pub use api::models::{RemoteContact, RemoteMessage, WireTimestamp};
pub use config::ClientConfig;
pub use error::{BackendError, ConfigError};
pub use state::{ChatState, Contact, Message};
pub use store::ChatStore;
pub use time::Timestamp;
