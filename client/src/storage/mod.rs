//! Durable token persistence.
//!
//! The gateway keeps its credential pair in memory and mirrors it into a
//! key/value store so a restarted process can resume the session. In the
//! original deployment this store is the browser's local storage; here it is
//! an injected capability so the gateway logic is testable without one.

use std::collections::HashMap;
use std::sync::Mutex;

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "auth_token";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// String key/value persistence for the credential pair.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store, used as the default backend and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}
