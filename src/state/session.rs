//! Session store: the authoritative in-memory authentication state.
//!
//! Operations mirror the backend's Sanctum-style flow: prime the CSRF
//! cookie, post credentials, post logout, resolve the current identity.
//! Each operation flips `loading` for its own duration and clears `error`
//! on entry; failures leave the store either fully pre-operation or fully
//! in the failure state, never in between.
//!
//! A 401 while resolving the user is the normal anonymous signal, not an
//! error: the user is cleared silently. Logout is destructive on intent:
//! local state is torn down even when the network call fails.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::{Cell, RefCell};

use crate::net::http::Transport;
use crate::net::types::{Credentials, LoginEnvelope, User};
use crate::util::notify::{Notifier, NotifyKind};
use crate::util::storage::SessionStorage;

const CSRF_COOKIE_PATH: &str = "/sanctum/csrf-cookie";
const LOGIN_PATH: &str = "/login";
const LOGOUT_PATH: &str = "/logout";
const USER_PATH: &str = "/user";

const MSG_CSRF_FAILED: &str = "Falha ao obter cookie CSRF";
const MSG_LOGIN_OK: &str = "Login realizado com sucesso!";
const MSG_LOGIN_FAILED: &str = "Erro ao fazer login";
const MSG_LOGOUT_OK: &str = "Logout realizado com sucesso";
const MSG_LOGOUT_FAILED: &str = "Erro ao fazer logout";
const MSG_FETCH_USER_FAILED: &str = "Erro ao buscar usuário";

/// Authentication state. `user` is non-null exactly when the last
/// resolution determined the session authenticated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Failure of an auth-affecting operation, carrying the surfaced message.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("{0}")]
    Csrf(String),
    #[error("{0}")]
    Login(String),
    #[error("{0}")]
    Logout(String),
}

/// Three-way outcome of resolving the current user identity.
#[derive(Clone, Debug, PartialEq)]
pub enum UserResolution {
    Authenticated(User),
    /// 401: the expected anonymous signal. Not surfaced.
    Unauthenticated,
    /// Any other failure; surfaced with the generic message.
    Failed(String),
}

/// Session store over the auth client (deployment root), the resource
/// client (`/api/v1`), a notifier, and durable storage.
///
/// One instance lives for the whole application process.
pub struct SessionStore<T, N, S> {
    state: RefCell<SessionState>,
    /// Whether this process has confirmed the session against the server.
    /// A user restored from storage is only a hint until then.
    resolved: Cell<bool>,
    auth: T,
    api: T,
    notifier: N,
    storage: S,
}

impl<T: Transport, N: Notifier, S: SessionStorage> SessionStore<T, N, S> {
    /// Build the store, restoring the persisted user identity if present.
    pub fn new(auth: T, api: T, notifier: N, storage: S) -> Self {
        let user = storage.load_user();
        Self {
            state: RefCell::new(SessionState { user, loading: false, error: None }),
            resolved: Cell::new(false),
            auth,
            api,
            notifier,
            storage,
        }
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Derived, never stored: recomputed from `user` on every read.
    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Whether the session has been confirmed against the server in this
    /// process (via `fetch_user` or a successful `login`).
    pub fn is_resolved(&self) -> bool {
        self.resolved.get()
    }

    /// Prime the anti-CSRF cookie via `GET /sanctum/csrf-cookie`.
    ///
    /// # Errors
    ///
    /// Fails with [`SessionError::Csrf`] when priming fails; `user` is
    /// left untouched.
    pub async fn prime_csrf(&self) -> Result<(), SessionError> {
        match self.auth.get(CSRF_COOKIE_PATH).await {
            Ok(_) => Ok(()),
            Err(_) => {
                self.state.borrow_mut().error = Some(MSG_CSRF_FAILED.to_owned());
                self.notifier.notify(NotifyKind::Negative, MSG_CSRF_FAILED);
                Err(SessionError::Csrf(MSG_CSRF_FAILED.to_owned()))
            }
        }
    }

    /// Authenticate with the backend.
    ///
    /// Primes the CSRF cookie, posts the credentials, and on success
    /// stores the user unwrapped from the `{data: {user}}` envelope.
    ///
    /// # Errors
    ///
    /// Fails with [`SessionError::Login`] carrying the server-supplied
    /// message when present, the generic message otherwise. A CSRF
    /// priming failure inside login follows the same path.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, SessionError> {
        self.begin();
        let result = self.login_inner(credentials).await;
        self.finish();
        result
    }

    async fn login_inner(&self, credentials: &Credentials) -> Result<User, SessionError> {
        if let Err(err) = self.auth.get(CSRF_COOKIE_PATH).await {
            let message = err.message.unwrap_or_else(|| MSG_LOGIN_FAILED.to_owned());
            return Err(self.fail_login(&message));
        }

        let body = match serde_json::to_value(credentials) {
            Ok(body) => body,
            Err(_) => return Err(self.fail_login(MSG_LOGIN_FAILED)),
        };

        match self.auth.post(LOGIN_PATH, Some(&body)).await {
            Ok(response) => match serde_json::from_value::<LoginEnvelope>(response.data) {
                Ok(envelope) => {
                    let user = envelope.data.user;
                    self.resolved.set(true);
                    self.set_user(Some(user.clone()));
                    let message = envelope.message.unwrap_or_else(|| MSG_LOGIN_OK.to_owned());
                    self.notifier.notify(NotifyKind::Positive, &message);
                    Ok(user)
                }
                Err(_) => Err(self.fail_login(MSG_LOGIN_FAILED)),
            },
            Err(err) => {
                let message = err.message.unwrap_or_else(|| MSG_LOGIN_FAILED.to_owned());
                Err(self.fail_login(&message))
            }
        }
    }

    /// End the session. Local state is cleared whether or not the network
    /// call succeeds.
    ///
    /// # Errors
    ///
    /// Fails with [`SessionError::Logout`] when the logout post fails;
    /// the session is torn down locally regardless.
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.begin();
        let result = match self.auth.post(LOGOUT_PATH, None).await {
            Ok(_) => {
                self.set_user(None);
                self.notifier.notify(NotifyKind::Info, MSG_LOGOUT_OK);
                Ok(())
            }
            Err(_) => {
                self.set_user(None);
                self.state.borrow_mut().error = Some(MSG_LOGOUT_FAILED.to_owned());
                self.notifier.notify(NotifyKind::Negative, MSG_LOGOUT_FAILED);
                Err(SessionError::Logout(MSG_LOGOUT_FAILED.to_owned()))
            }
        };
        self.finish();
        result
    }

    /// Resolve the current identity via `GET /user`.
    ///
    /// The raw response body becomes the user, with no envelope unwrapping
    /// (asymmetric with `login`). A 401 clears the user silently;
    /// any other failure clears it and surfaces the generic message.
    pub async fn fetch_user(&self) -> UserResolution {
        self.begin();
        let outcome = match self.api.get(USER_PATH).await {
            Ok(response) => match serde_json::from_value::<User>(response.data) {
                Ok(user) => {
                    self.set_user(Some(user.clone()));
                    UserResolution::Authenticated(user)
                }
                Err(_) => self.fail_fetch_user(),
            },
            Err(err) if err.status == Some(401) => {
                self.set_user(None);
                UserResolution::Unauthenticated
            }
            Err(_) => self.fail_fetch_user(),
        };
        self.resolved.set(true);
        self.finish();
        outcome
    }

    fn begin(&self) {
        let mut state = self.state.borrow_mut();
        state.loading = true;
        state.error = None;
    }

    fn finish(&self) {
        self.state.borrow_mut().loading = false;
    }

    fn set_user(&self, user: Option<User>) {
        self.storage.save_user(user.as_ref());
        self.state.borrow_mut().user = user;
    }

    fn fail_login(&self, message: &str) -> SessionError {
        self.set_user(None);
        self.state.borrow_mut().error = Some(message.to_owned());
        self.notifier.notify(NotifyKind::Negative, message);
        SessionError::Login(message.to_owned())
    }

    fn fail_fetch_user(&self) -> UserResolution {
        self.set_user(None);
        self.state.borrow_mut().error = Some(MSG_FETCH_USER_FAILED.to_owned());
        self.notifier.notify(NotifyKind::Negative, MSG_FETCH_USER_FAILED);
        UserResolution::Failed(MSG_FETCH_USER_FAILED.to_owned())
    }
}
