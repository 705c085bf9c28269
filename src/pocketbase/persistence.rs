// ============================================================================
// AUTH PERSISTENCE - where the credential store keeps token + record
// ============================================================================

use std::cell::RefCell;

use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

use crate::models::UserRecord;

/// The JSON blob kept under the storage key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub token: String,
    pub model: Option<UserRecord>,
}

pub trait AuthPersistence {
    fn load(&self) -> Option<PersistedAuth>;
    fn save(&self, auth: &PersistedAuth);
    fn clear(&self);
    /// The localStorage key, when persisted in the browser
    fn storage_key(&self) -> Option<&str> {
        None
    }
}

pub struct LocalStoragePersistence {
    key: String,
}

impl LocalStoragePersistence {
    /// `None` when localStorage is not reachable (no window, private mode, ...)
    pub fn new(key: impl Into<String>) -> Option<Self> {
        web_sys::window()?.local_storage().ok()??;
        Some(Self { key: key.into() })
    }
}

impl AuthPersistence for LocalStoragePersistence {
    fn load(&self) -> Option<PersistedAuth> {
        LocalStorage::get::<PersistedAuth>(&self.key).ok()
    }

    fn save(&self, auth: &PersistedAuth) {
        if let Err(e) = LocalStorage::set(&self.key, auth) {
            log::error!("❌ Could not persist credentials: {}", e);
        }
    }

    fn clear(&self) {
        LocalStorage::delete(&self.key);
    }

    fn storage_key(&self) -> Option<&str> {
        Some(&self.key)
    }
}

#[derive(Default)]
pub struct MemoryPersistence {
    value: RefCell<Option<PersistedAuth>>,
}

impl MemoryPersistence {
    pub fn with(auth: PersistedAuth) -> Self {
        Self {
            value: RefCell::new(Some(auth)),
        }
    }
}

impl AuthPersistence for MemoryPersistence {
    fn load(&self) -> Option<PersistedAuth> {
        self.value.borrow().clone()
    }

    fn save(&self, auth: &PersistedAuth) {
        *self.value.borrow_mut() = Some(auth.clone());
    }

    fn clear(&self) {
        *self.value.borrow_mut() = None;
    }
}
