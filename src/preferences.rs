//! Persisted chime preference.
//!
//! A single string (the chime asset path) lives in client-local storage
//! under [`CHIME_STORAGE_KEY`]. It is read once at startup and overwritten
//! on every selector change. Last write wins.

use crate::config::{CHIME_OPTIONS, CHIME_STORAGE_KEY, DEFAULT_CHIME};
use log::{info, warn};
use std::fmt;

/// Errors raised by a preference backend.
#[derive(Debug)]
pub enum StorageError {
    Unavailable,
    Read(String),
    Write(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "Local storage is not available"),
            StorageError::Read(e) => write!(f, "Failed to read preference: {}", e),
            StorageError::Write(e) => write!(f, "Failed to write preference: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

/// Key-value backend for preferences.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Browser `localStorage` backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        gloo_utils::window()
            .local_storage()
            .ok()
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// Currently selected chime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    chime: String,
}

impl Preferences {
    /// Read the stored chime, persisting the default on first run.
    pub fn load(store: &mut impl PreferenceStore) -> Self {
        let stored = store.load(CHIME_STORAGE_KEY).unwrap_or_else(|e| {
            warn!("{}", e);
            None
        });

        match stored {
            Some(chime) if !chime.is_empty() => {
                info!("Loaded saved chime: {}", chime);
                Self { chime }
            }
            _ => {
                info!("No saved chime, using default {}", DEFAULT_CHIME);
                if let Err(e) = store.save(CHIME_STORAGE_KEY, DEFAULT_CHIME) {
                    warn!("{}", e);
                }
                Self {
                    chime: DEFAULT_CHIME.to_string(),
                }
            }
        }
    }

    /// Apply a new chime and persist it immediately.
    pub fn select(&mut self, store: &mut impl PreferenceStore, chime: &str) {
        self.chime = chime.to_string();
        if let Err(e) = store.save(CHIME_STORAGE_KEY, chime) {
            warn!("{}", e);
        }
    }

    pub fn chime(&self) -> &str {
        &self.chime
    }

    /// Selector options. A stored value outside the catalog is listed too so
    /// the selector can still reflect it.
    pub fn options(&self) -> Vec<(String, String)> {
        let mut options: Vec<(String, String)> = CHIME_OPTIONS
            .iter()
            .map(|(path, label)| (path.to_string(), label.to_string()))
            .collect();
        if !options.iter().any(|(path, _)| *path == self.chime) {
            options.push((self.chime.clone(), self.chime.clone()));
        }
        options
    }
}
