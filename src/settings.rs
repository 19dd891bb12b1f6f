use crate::storage::{Storage, StorageError};
use std::sync::Arc;
use tracing::warn;

/// Storage entry holding the primary provider credential
pub const API_KEY_ENTRY: &str = "DEEPSEEK_API_KEY";

/// Read access to the currently configured primary provider credential
pub trait CredentialSource: Send + Sync {
    fn primary_api_key(&self) -> Option<String>;
}

/// A fixed credential, e.g. from a command line flag or a test
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(pub Option<String>);

impl CredentialSource for StaticCredential {
    fn primary_api_key(&self) -> Option<String> {
        normalize_key(self.0.as_deref())
    }
}

/// Durable user settings backed by a storage entry
#[derive(Clone)]
pub struct SettingsStore {
    storage: Arc<dyn Storage>,
}

impl SettingsStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn api_key(&self) -> Option<String> {
        match self.storage.get(API_KEY_ENTRY) {
            Ok(value) => normalize_key(value.as_deref()),
            Err(err) => {
                warn!("Failed to read API key setting: {err}");
                None
            }
        }
    }

    /// Stores the trimmed key. An empty key removes the entry.
    pub fn set_api_key(&self, key: &str) -> Result<(), StorageError> {
        match normalize_key(Some(key)) {
            Some(key) => self.storage.set(API_KEY_ENTRY, &key),
            None => self.clear_api_key(),
        }
    }

    pub fn clear_api_key(&self) -> Result<(), StorageError> {
        self.storage.remove(API_KEY_ENTRY)
    }
}

impl CredentialSource for SettingsStore {
    fn primary_api_key(&self) -> Option<String> {
        self.api_key()
    }
}

fn normalize_key(key: Option<&str>) -> Option<String> {
    key.map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

/// Masks a credential for display, keeping only its last four characters
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
