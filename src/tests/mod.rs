
use crate::api::backend::Backend;
use crate::api::models::{RemoteContact, RemoteMessage, WireTimestamp};
use crate::error::BackendError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};

/// Backend that replays scripted responses and records every call.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    contacts: Arc<Mutex<VecDeque<Result<Vec<RemoteContact>, BackendError>>>>,
    messages: Arc<Mutex<VecDeque<Result<Vec<RemoteMessage>, BackendError>>>>,
    sends: Arc<Mutex<VecDeque<Result<(), BackendError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_contacts(&self, res: Result<Vec<RemoteContact>, BackendError>) {
        self.contacts.lock().await.push_back(res);
    }

    pub async fn push_messages(&self, res: Result<Vec<RemoteMessage>, BackendError>) {
        self.messages.lock().await.push_back(res);
    }

    pub async fn push_send(&self, res: Result<(), BackendError>) {
        self.sends.lock().await.push_back(res);
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

fn unscripted() -> BackendError {
    BackendError::Remote("no scripted response".to_string())
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn list_contacts(&self) -> Result<Vec<RemoteContact>, BackendError> {
        self.calls.lock().await.push("list_contacts".to_string());
        self.contacts.lock().await.pop_front().unwrap_or_else(|| Err(unscripted()))
    }

    async fn list_messages(&self, contact_id: &str, offset: u32) -> Result<Vec<RemoteMessage>, BackendError> {
        self.calls
            .lock()
            .await
            .push(format!("list_messages {contact_id} {offset}"));
        self.messages.lock().await.pop_front().unwrap_or_else(|| Err(unscripted()))
    }

    async fn send_message(&self, contact_id: &str, text: &str) -> Result<(), BackendError> {
        self.calls
            .lock()
            .await
            .push(format!("send_message {contact_id} {text}"));
        self.sends.lock().await.pop_front().unwrap_or_else(|| Err(unscripted()))
    }
}

type Gate<T> = oneshot::Receiver<Vec<T>>;

/// Backend whose lists resolve only when the test releases them. A dropped
/// sender turns into a backend failure.
#[derive(Default)]
pub struct GatedBackend {
    contact_gates: Mutex<VecDeque<Gate<RemoteContact>>>,
    message_gates: Mutex<VecDeque<Gate<RemoteMessage>>>,
    started: AtomicUsize,
}

impl GatedBackend {
    pub fn contacts(gates: Vec<Gate<RemoteContact>>) -> Self {
        Self {
            contact_gates: Mutex::new(gates.into()),
            ..Self::default()
        }
    }

    pub fn messages(gates: Vec<Gate<RemoteMessage>>) -> Self {
        Self {
            message_gates: Mutex::new(gates.into()),
            ..Self::default()
        }
    }

    /// Yields until `n` backend calls have picked up their gate.
    pub async fn wait_started(&self, n: usize) {
        while self.started.load(Ordering::SeqCst) < n {
            tokio::task::yield_now().await;
        }
    }
}

async fn pass_gate<T>(gates: &Mutex<VecDeque<Gate<T>>>, started: &AtomicUsize) -> Result<Vec<T>, BackendError> {
    let gate = gates.lock().await.pop_front();
    started.fetch_add(1, Ordering::SeqCst);
    match gate {
        Some(rx) => rx.await.map_err(|_| BackendError::Remote("gate dropped".to_string())),
        None => Err(BackendError::Remote("no gate".to_string())),
    }
}

#[async_trait]
impl Backend for GatedBackend {
    async fn list_contacts(&self) -> Result<Vec<RemoteContact>, BackendError> {
        pass_gate(&self.contact_gates, &self.started).await
    }

    async fn list_messages(&self, _contact_id: &str, _offset: u32) -> Result<Vec<RemoteMessage>, BackendError> {
        pass_gate(&self.message_gates, &self.started).await
    }

    async fn send_message(&self, _contact_id: &str, _text: &str) -> Result<(), BackendError> {
        Ok(())
    }
}

pub fn remote_contact(id: &str, name: &str) -> RemoteContact {
    RemoteContact {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn remote_message(id: &str, text: &str, out: bool, at: &str) -> RemoteMessage {
    RemoteMessage {
        id: id.to_string(),
        text: text.to_string(),
        out,
        at: Some(WireTimestamp::Text(at.to_string())),
    }
}

pub fn backend_down() -> BackendError {
    BackendError::Remote("backend down".to_string())
}
