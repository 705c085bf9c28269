// ============================================================================
// AUTH STORE - token + current user, persisted and observable
// ============================================================================
// Single-threaded (Rc<RefCell>). Observers are held through AuthSubscription
// guards and are removed when the guard is dropped.
// ============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use super::persistence::{AuthPersistence, PersistedAuth};
use super::token;
use crate::models::UserRecord;

type Listener = Rc<dyn Fn(&str, Option<&UserRecord>)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

#[derive(Default)]
struct Credentials {
    token: String,
    model: Option<UserRecord>,
}

#[derive(Clone)]
pub struct AuthStore {
    credentials: Rc<RefCell<Credentials>>,
    listeners: Rc<RefCell<Listeners>>,
    persistence: Rc<dyn AuthPersistence>,
}

impl PartialEq for AuthStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.credentials, &other.credentials)
    }
}

impl AuthStore {
    /// Builds the store and loads whatever credentials were persisted last time
    pub fn new(persistence: Rc<dyn AuthPersistence>) -> Self {
        let credentials = match persistence.load() {
            Some(saved) => Credentials {
                token: saved.token,
                model: saved.model,
            },
            None => Credentials::default(),
        };

        Self {
            credentials: Rc::new(RefCell::new(credentials)),
            listeners: Rc::new(RefCell::new(Listeners::default())),
            persistence,
        }
    }

    pub fn token(&self) -> String {
        self.credentials.borrow().token.clone()
    }

    pub fn model(&self) -> Option<UserRecord> {
        self.credentials.borrow().model.clone()
    }

    /// True when the token is a JWT that has not expired yet
    pub fn is_valid(&self) -> bool {
        token::is_unexpired(&self.credentials.borrow().token, chrono::Utc::now().timestamp())
    }

    /// The cached user, but only while the token is still valid
    pub fn valid_model(&self) -> Option<UserRecord> {
        if self.is_valid() {
            self.model()
        } else {
            None
        }
    }

    pub fn save(&self, token: impl Into<String>, model: Option<UserRecord>) {
        let snapshot = {
            let mut credentials = self.credentials.borrow_mut();
            credentials.token = token.into();
            credentials.model = model;
            PersistedAuth {
                token: credentials.token.clone(),
                model: credentials.model.clone(),
            }
        };
        self.persistence.save(&snapshot);
        self.notify();
    }

    pub fn clear(&self) {
        {
            let mut credentials = self.credentials.borrow_mut();
            credentials.token.clear();
            credentials.model = None;
        }
        self.persistence.clear();
        self.notify();
    }

    /// Registers an observer called with `(token, model)` after every change
    pub fn on_change(&self, listener: impl Fn(&str, Option<&UserRecord>) + 'static) -> AuthSubscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Rc::new(listener)));

        AuthSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Re-reads the persisted copy, e.g. after another tab wrote it
    pub fn reload(&self) {
        let saved = self.persistence.load();
        {
            let mut credentials = self.credentials.borrow_mut();
            match saved {
                Some(saved) => {
                    credentials.token = saved.token;
                    credentials.model = saved.model;
                }
                None => {
                    credentials.token.clear();
                    credentials.model = None;
                }
            }
        }
        self.notify();
    }

    /// Follows credential changes made by other tabs through the `storage` event
    pub fn watch_other_tabs(&self) -> Option<StorageWatch> {
        let key = self.persistence.storage_key()?.to_string();
        let window = web_sys::window()?;

        let store = self.clone();
        let closure = Closure::<dyn FnMut(web_sys::StorageEvent)>::new(move |event: web_sys::StorageEvent| {
            // key() is None when the whole storage was cleared
            let matches = event.key().map(|k| k == key).unwrap_or(true);
            if matches {
                log::info!("🔄 Credentials changed in another tab");
                store.reload();
            }
        });

        if let Err(e) = window.add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref()) {
            log::error!("❌ Could not listen for storage events: {:?}", e);
            return None;
        }

        Some(StorageWatch { window, closure })
    }

    fn notify(&self) {
        // Snapshot so listeners may subscribe or unsubscribe while being called
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        // Re-read per listener: an earlier one may have saved or cleared
        for listener in listeners {
            let (token, model) = {
                let credentials = self.credentials.borrow();
                (credentials.token.clone(), credentials.model.clone())
            };
            listener(&token, model.as_ref());
        }
    }
}

/// Keeps an `on_change` observer registered until dropped
#[must_use = "dropping the subscription unregisters the listener"]
pub struct AuthSubscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().entries.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Keeps the `storage` event listener attached until dropped
pub struct StorageWatch {
    window: web_sys::Window,
    closure: Closure<dyn FnMut(web_sys::StorageEvent)>,
}

impl Drop for StorageWatch {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("storage", self.closure.as_ref().unchecked_ref());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::pocketbase::persistence::MemoryPersistence;
    use crate::pocketbase::token::fake_jwt;

    fn user(id: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            collection_id: "_pb_users_auth_".to_string(),
            collection_name: "users".to_string(),
            username: format!("user_{}", id),
            email: None,
            name: String::new(),
            avatar: String::new(),
            verified: true,
        }
    }

    fn future_exp() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_loads_persisted_credentials() {
        let persistence = Rc::new(MemoryPersistence::with(PersistedAuth {
            token: fake_jwt(future_exp()),
            model: Some(user("u1")),
        }));
        let store = AuthStore::new(persistence);

        assert!(store.is_valid());
        assert_eq!(store.valid_model(), Some(user("u1")));
    }

    #[test]
    fn test_expired_token_hides_model() {
        let persistence = Rc::new(MemoryPersistence::with(PersistedAuth {
            token: fake_jwt(chrono::Utc::now().timestamp() - 10),
            model: Some(user("u1")),
        }));
        let store = AuthStore::new(persistence);

        assert!(!store.is_valid());
        assert_eq!(store.model(), Some(user("u1")));
        assert_eq!(store.valid_model(), None);
    }

    #[test]
    fn test_save_and_clear_persist() {
        let persistence = Rc::new(MemoryPersistence::default());
        let store = AuthStore::new(persistence.clone());

        store.save("tok", Some(user("u1")));
        assert_eq!(persistence.load().map(|a| a.token), Some("tok".to_string()));

        store.clear();
        assert_eq!(persistence.load(), None);
        assert_eq!(store.token(), "");
        assert_eq!(store.model(), None);
    }

    #[test]
    fn test_listeners_see_every_change() {
        let store = AuthStore::new(Rc::new(MemoryPersistence::default()));
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();

        let _subscription = {
            let seen = seen.clone();
            store.on_change(move |_, model| seen.borrow_mut().push(model.map(|m| m.id.clone())))
        };

        store.save("tok", Some(user("u1")));
        store.clear();

        assert_eq!(*seen.borrow(), vec![Some("u1".to_string()), None]);
    }

    #[test]
    fn test_dropping_subscription_unregisters() {
        let store = AuthStore::new(Rc::new(MemoryPersistence::default()));
        let calls = Rc::new(Cell::new(0));

        let subscription = {
            let calls = calls.clone();
            store.on_change(move |_, _| calls.set(calls.get() + 1))
        };
        assert_eq!(store.listener_count(), 1);

        store.clear();
        drop(subscription);
        store.clear();

        assert_eq!(calls.get(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_clear_store_without_panicking() {
        let store = AuthStore::new(Rc::new(MemoryPersistence::default()));
        let inner = store.clone();
        let _subscription = store.on_change(move |token, _| {
            if token == "bad" {
                inner.clear();
            }
        });

        store.save("bad", None);

        assert_eq!(store.token(), "");
    }

    #[test]
    fn test_later_listeners_see_a_clear_made_by_an_earlier_one() {
        let store = AuthStore::new(Rc::new(MemoryPersistence::default()));
        let inner = store.clone();
        let _clearer = store.on_change(move |token, _| {
            if token == "bad" {
                inner.clear();
            }
        });
        let last_seen = Rc::new(RefCell::new(None::<String>));
        let _observer = {
            let last_seen = last_seen.clone();
            store.on_change(move |token, _| *last_seen.borrow_mut() = Some(token.to_string()))
        };

        store.save("bad", Some(user("u1")));

        assert_eq!(store.token(), "");
        assert_eq!(last_seen.borrow().as_deref(), Some(""));
    }

    #[test]
    fn test_reload_picks_up_external_writes() {
        let persistence = Rc::new(MemoryPersistence::default());
        let store = AuthStore::new(persistence.clone());
        let latest = Rc::new(RefCell::new(None));
        let _subscription = {
            let latest = latest.clone();
            store.on_change(move |_, model| *latest.borrow_mut() = model.cloned())
        };

        persistence.save(&PersistedAuth {
            token: "other-tab".to_string(),
            model: Some(user("u2")),
        });
        store.reload();

        assert_eq!(store.token(), "other-tab");
        assert_eq!(*latest.borrow(), Some(user("u2")));
    }

    #[test]
    fn test_memory_store_does_not_watch_tabs() {
        let store = AuthStore::new(Rc::new(MemoryPersistence::default()));
        assert!(store.watch_other_tabs().is_none());
    }
}
