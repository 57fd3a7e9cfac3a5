//! Navigation guard.
//!
//! Consulted before every route transition. First makes sure the session
//! is resolved (a user restored from storage is only a hint until the
//! server confirms it), then gates on the target route's declared auth
//! requirement. Resolution failures are absorbed by the session store's
//! own contract and degrade to "not authenticated" for this navigation.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::net::http::Transport;
use crate::router::routes::{ROUTE_LANDING, ROUTE_LOGIN, RouteMeta};
use crate::state::session::{SessionStore, UserResolution};
use crate::util::notify::Notifier;
use crate::util::storage::SessionStorage;

/// Decision for a pending navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    /// Abort and navigate to the named route instead.
    Redirect(&'static str),
}

/// Gate a navigation on the session state alone (no resolution step).
///
/// The requires-auth check runs before the already-logged-in login-route
/// check, so a route that somehow combined both would redirect to login.
pub fn resolve_navigation(to: &RouteMeta, logged_in: bool) -> GuardOutcome {
    if to.requires_auth && !logged_in {
        return GuardOutcome::Redirect(ROUTE_LOGIN);
    }
    if to.name == ROUTE_LOGIN && logged_in {
        return GuardOutcome::Redirect(ROUTE_LANDING);
    }
    GuardOutcome::Allow
}

/// Full guard: resolve a restored-but-unverified session, then gate.
///
/// Runs to completion before the navigation proceeds. The fetch is
/// skipped when a resolution is already in flight; that check is a
/// duplicate-suppression heuristic, not mutual exclusion.
pub async fn before_each<T, N, S>(
    store: &SessionStore<T, N, S>,
    to: &RouteMeta,
) -> GuardOutcome
where
    T: Transport,
    N: Notifier,
    S: SessionStorage,
{
    if store.is_logged_in() && !store.is_resolved() && !store.is_loading() {
        if let UserResolution::Failed(message) = store.fetch_user().await {
            log::warn!("session resolution failed during navigation: {message}");
        }
    }
    resolve_navigation(to, store.is_logged_in())
}

/// Standalone session check for use outside the router (UI actions).
///
/// Resolves the user when none is loaded and no fetch is in flight, then
/// reports whether the session is authenticated.
pub async fn check_auth<T, N, S>(store: &SessionStore<T, N, S>) -> bool
where
    T: Transport,
    N: Notifier,
    S: SessionStorage,
{
    if store.user().is_none() && !store.is_loading() {
        if let UserResolution::Failed(message) = store.fetch_user().await {
            log::warn!("auth check failed: {message}");
        }
    }
    store.is_logged_in()
}

/// Run [`check_auth`] and redirect to `fallback` (the login route when
/// `None`) if the session is not authenticated.
pub async fn redirect_if_not_authenticated<T, N, S>(
    store: &SessionStore<T, N, S>,
    fallback: Option<&'static str>,
) -> GuardOutcome
where
    T: Transport,
    N: Notifier,
    S: SessionStorage,
{
    if check_auth(store).await {
        GuardOutcome::Allow
    } else {
        GuardOutcome::Redirect(fallback.unwrap_or(ROUTE_LOGIN))
    }
}
