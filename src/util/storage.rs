//! Durable session storage.
//!
//! Only the user identity survives a reload; `loading` and `error` always
//! re-initialize. The persisted value is a `{"user": ...}` JSON document
//! under a single `localStorage` key, overwritten on every user mutation.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::net::types::User;

/// `localStorage` key holding the persisted session.
pub const SESSION_STORAGE_KEY: &str = "auth-store";

#[derive(Serialize, Deserialize)]
#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
struct PersistedSession {
    user: Option<User>,
}

/// Durable store for the session's user identity.
pub trait SessionStorage {
    /// Restore the persisted user, if any.
    fn load_user(&self) -> Option<User>;

    /// Overwrite the persisted user. `None` clears it.
    fn save_user(&self, user: Option<&User>);
}

impl<S: SessionStorage + ?Sized> SessionStorage for std::rc::Rc<S> {
    fn load_user(&self) -> Option<User> {
        (**self).load_user()
    }

    fn save_user(&self, user: Option<&User>) {
        (**self).save_user(user);
    }
}

/// In-memory storage for tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemorySession {
    user: RefCell<Option<User>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(user: User) -> Self {
        Self { user: RefCell::new(Some(user)) }
    }
}

impl SessionStorage for MemorySession {
    fn load_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    fn save_user(&self, user: Option<&User>) {
        *self.user.borrow_mut() = user.cloned();
    }
}

/// Browser storage over `window.localStorage`. Outside the browser every
/// operation is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageSession;

impl SessionStorage for LocalStorageSession {
    fn load_user(&self) -> Option<User> {
        #[cfg(feature = "hydrate")]
        {
            let storage = web_sys::window()?.local_storage().ok()??;
            let raw = storage.get_item(SESSION_STORAGE_KEY).ok()??;
            let persisted: PersistedSession = serde_json::from_str(&raw).ok()?;
            persisted.user
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save_user(&self, user: Option<&User>) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
            else {
                return;
            };
            let persisted = PersistedSession { user: user.cloned() };
            if let Ok(raw) = serde_json::to_string(&persisted) {
                let _ = storage.set_item(SESSION_STORAGE_KEY, &raw);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = user;
        }
    }
}
