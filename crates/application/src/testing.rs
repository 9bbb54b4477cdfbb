//! Test doubles for the ports.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use replydesk_domain::{ApiRequest, ApiResponse};

use crate::ports::{HttpTransport, KeyValueStorage, Navigator, StorageError, TransportError};

#[derive(Debug, Default)]
pub struct MemoryKv {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn insert(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }
}

impl KeyValueStorage for MemoryKv {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Memory storage that refuses writes to one key, or all removals.
#[derive(Debug, Default)]
pub struct FailingStorage {
    inner: MemoryKv,
    failing_key: Option<String>,
    reject_removes: bool,
}

impl FailingStorage {
    pub fn failing_on(key: &str) -> Self {
        Self {
            failing_key: Some(key.to_string()),
            ..Self::default()
        }
    }

    pub fn rejecting_removes() -> Self {
        Self {
            reject_removes: true,
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl KeyValueStorage for FailingStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.failing_key.as_deref() == Some(key) {
            return Err(StorageError::Unavailable("disk full".to_string()));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.reject_removes {
            return Err(StorageError::Unavailable("read-only".to_string()));
        }
        self.inner.remove_item(key)
    }
}

/// Transport that replays queued outcomes and records what it was sent.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn respond(&self, response: ApiResponse) {
        self.outcomes.lock().unwrap().push_back(Ok(response));
    }

    pub fn respond_json(&self, status: u16, body: &serde_json::Value) {
        self.respond(ApiResponse::json(status, body).unwrap());
    }

    pub fn fail(&self, error: TransportError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_sent(&self) -> ApiRequest {
        self.sent.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted response".to_string())))
    }
}

/// Navigator that records every location change.
#[derive(Debug)]
pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            history: Mutex::new(vec![path.to_string()]),
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn location(&self) -> String {
        self.history.lock().unwrap().last().cloned().unwrap_or_default()
    }

    fn push(&self, path: &str) {
        self.history.lock().unwrap().push(path.to_string());
    }

    fn replace(&self, path: &str) {
        let mut history = self.history.lock().unwrap();
        history.pop();
        history.push(path.to_string());
    }
}
