use std::rc::Rc;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::testing::{RecordingNotifier, StubTransport};
use crate::util::notify::NotifyKind;
use crate::util::storage::MemorySession;

type TestStore = SessionStore<Rc<StubTransport>, Rc<RecordingNotifier>, Rc<MemorySession>>;

struct Harness {
    auth: Rc<StubTransport>,
    api: Rc<StubTransport>,
    notifier: Rc<RecordingNotifier>,
    storage: Rc<MemorySession>,
    store: TestStore,
}

fn harness() -> Harness {
    harness_with_storage(MemorySession::new())
}

fn harness_with_storage(storage: MemorySession) -> Harness {
    let auth = Rc::new(StubTransport::default());
    let api = Rc::new(StubTransport::default());
    let notifier = Rc::new(RecordingNotifier::default());
    let storage = Rc::new(storage);
    let store = SessionStore::new(
        Rc::clone(&auth),
        Rc::clone(&api),
        Rc::clone(&notifier),
        Rc::clone(&storage),
    );
    Harness { auth, api, notifier, storage, store }
}

fn elessandro() -> User {
    User { id: 1, name: "Elessandro".to_owned(), email: None }
}

fn credentials() -> Credentials {
    Credentials { email: "user@example.com".to_owned(), password: "123456".to_owned() }
}

// =============================================================
// Initial state
// =============================================================

#[test]
fn starts_anonymous_and_idle() {
    let h = harness();
    let state = h.store.snapshot();
    assert_eq!(state.user, None);
    assert!(!state.loading);
    assert_eq!(state.error, None);
    assert!(!h.store.is_logged_in());
    assert!(!h.store.is_resolved());
}

#[test]
fn restores_persisted_user_as_unresolved() {
    let h = harness_with_storage(MemorySession::with_user(elessandro()));
    assert!(h.store.is_logged_in());
    assert_eq!(h.store.user(), Some(elessandro()));
    assert!(!h.store.is_resolved());
    // loading and error never persist.
    assert!(!h.store.is_loading());
    assert_eq!(h.store.error(), None);
}

// =============================================================
// prime_csrf
// =============================================================

#[test]
fn prime_csrf_success_is_silent() {
    let h = harness();
    h.auth.respond_ok(204, json!(null));

    block_on(h.store.prime_csrf()).expect("priming should succeed");

    assert_eq!(h.auth.calls(), vec!["GET /sanctum/csrf-cookie"]);
    assert_eq!(h.store.error(), None);
    assert!(h.notifier.notifications().is_empty());
}

#[test]
fn prime_csrf_failure_sets_fixed_message_and_notifies() {
    let h = harness();
    h.auth.respond_err(Some(500), None);

    let err = block_on(h.store.prime_csrf()).expect_err("priming should fail");

    assert_eq!(err, SessionError::Csrf("Falha ao obter cookie CSRF".to_owned()));
    assert_eq!(h.store.error(), Some("Falha ao obter cookie CSRF".to_owned()));
    assert_eq!(h.store.user(), None);
    let notes = h.notifier.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotifyKind::Negative);
    assert_eq!(notes[0].message, "Falha ao obter cookie CSRF");
}

// =============================================================
// login
// =============================================================

#[test]
fn login_success_stores_unwrapped_user_and_notifies() {
    let h = harness();
    h.auth.respond_ok(204, json!(null));
    h.auth.respond_ok(
        200,
        json!({
            "data": { "user": { "id": 1, "name": "Elessandro" } },
            "message": "Login realizado com sucesso!"
        }),
    );

    let user = block_on(h.store.login(&credentials())).expect("login should succeed");

    assert_eq!(user, elessandro());
    assert_eq!(h.auth.calls(), vec!["GET /sanctum/csrf-cookie", "POST /login"]);
    assert_eq!(h.store.user(), Some(elessandro()));
    assert!(h.store.is_logged_in());
    assert!(h.store.is_resolved());
    assert_eq!(h.store.error(), None);
    assert!(!h.store.is_loading());

    let notes = h.notifier.notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotifyKind::Positive);
    assert_eq!(notes[0].message, "Login realizado com sucesso!");
}

#[test]
fn login_success_without_server_message_uses_default() {
    let h = harness();
    h.auth.respond_ok(204, json!(null));
    h.auth.respond_ok(200, json!({ "data": { "user": { "id": 2, "name": "Ana" } } }));

    block_on(h.store.login(&credentials())).expect("login should succeed");

    assert_eq!(h.notifier.notifications()[0].message, "Login realizado com sucesso!");
}

#[test]
fn login_persists_the_user() {
    let h = harness();
    h.auth.respond_ok(204, json!(null));
    h.auth.respond_ok(200, json!({ "data": { "user": { "id": 1, "name": "Elessandro" } } }));

    block_on(h.store.login(&credentials())).expect("login should succeed");

    assert_eq!(h.storage.load_user(), Some(elessandro()));
}

#[test]
fn login_rejection_surfaces_server_message() {
    let h = harness();
    h.auth.respond_ok(204, json!(null));
    h.auth.respond_err(Some(422), Some("Credenciais inválidas"));

    let err = block_on(h.store.login(&credentials())).expect_err("login should fail");

    assert_eq!(err, SessionError::Login("Credenciais inválidas".to_owned()));
    assert_eq!(h.store.user(), None);
    assert!(!h.store.is_logged_in());
    assert_eq!(h.store.error(), Some("Credenciais inválidas".to_owned()));
    assert!(!h.store.is_loading());

    let notes = h.notifier.notifications();
    assert_eq!(notes[0].kind, NotifyKind::Negative);
    assert_eq!(notes[0].message, "Credenciais inválidas");
}

#[test]
fn login_failure_without_message_uses_generic_default() {
    let h = harness();
    h.auth.respond_ok(204, json!(null));
    h.auth.respond_err(None, None);

    let err = block_on(h.store.login(&credentials())).expect_err("login should fail");

    assert_eq!(err, SessionError::Login("Erro ao fazer login".to_owned()));
    assert_eq!(h.store.error(), Some("Erro ao fazer login".to_owned()));
}

#[test]
fn login_csrf_failure_is_reported_as_login_failure() {
    let h = harness();
    h.auth.respond_err(Some(500), None);

    let err = block_on(h.store.login(&credentials())).expect_err("login should fail");

    assert_eq!(err, SessionError::Login("Erro ao fazer login".to_owned()));
    // The credential post is never attempted.
    assert_eq!(h.auth.calls(), vec!["GET /sanctum/csrf-cookie"]);
    assert!(!h.store.is_loading());
}

#[test]
fn login_clears_previous_error_on_entry() {
    let h = harness();
    h.auth.respond_ok(204, json!(null));
    h.auth.respond_err(Some(422), Some("Credenciais inválidas"));
    let _ = block_on(h.store.login(&credentials()));
    assert!(h.store.error().is_some());

    h.auth.respond_ok(204, json!(null));
    h.auth.respond_ok(200, json!({ "data": { "user": { "id": 1, "name": "Elessandro" } } }));
    block_on(h.store.login(&credentials())).expect("second login should succeed");

    assert_eq!(h.store.error(), None);
}

// =============================================================
// logout
// =============================================================

#[test]
fn logout_success_clears_user_and_notifies_info() {
    let h = harness_with_storage(MemorySession::with_user(elessandro()));
    h.auth.respond_ok(200, json!(null));

    block_on(h.store.logout()).expect("logout should succeed");

    assert_eq!(h.auth.calls(), vec!["POST /logout"]);
    assert_eq!(h.store.user(), None);
    assert!(!h.store.is_logged_in());
    assert_eq!(h.store.error(), None);
    assert_eq!(h.storage.load_user(), None);

    let notes = h.notifier.notifications();
    assert_eq!(notes[0].kind, NotifyKind::Info);
    assert_eq!(notes[0].message, "Logout realizado com sucesso");
}

#[test]
fn logout_failure_still_tears_down_the_session() {
    let h = harness_with_storage(MemorySession::with_user(elessandro()));
    h.auth.respond_err(Some(500), None);

    let err = block_on(h.store.logout()).expect_err("logout should fail");

    assert_eq!(err, SessionError::Logout("Erro ao fazer logout".to_owned()));
    assert_eq!(h.store.user(), None);
    assert!(!h.store.is_logged_in());
    assert_eq!(h.store.error(), Some("Erro ao fazer logout".to_owned()));
    assert!(!h.store.is_loading());
    assert_eq!(h.storage.load_user(), None);

    let notes = h.notifier.notifications();
    assert_eq!(notes[0].kind, NotifyKind::Negative);
    assert_eq!(notes[0].message, "Erro ao fazer logout");
}

// =============================================================
// fetch_user
// =============================================================

#[test]
fn fetch_user_takes_raw_body_as_user() {
    let h = harness();
    h.api.respond_ok(200, json!({ "id": 1, "name": "Elessandro" }));

    let outcome = block_on(h.store.fetch_user());

    assert_eq!(outcome, UserResolution::Authenticated(elessandro()));
    assert_eq!(h.api.calls(), vec!["GET /user"]);
    assert_eq!(h.store.user(), Some(elessandro()));
    assert!(h.store.is_resolved());
    assert_eq!(h.store.error(), None);
    assert!(!h.store.is_loading());
}

#[test]
fn fetch_user_401_is_silent() {
    let h = harness_with_storage(MemorySession::with_user(elessandro()));
    h.api.respond_err(Some(401), None);

    let outcome = block_on(h.store.fetch_user());

    assert_eq!(outcome, UserResolution::Unauthenticated);
    assert_eq!(h.store.user(), None);
    assert!(!h.store.is_logged_in());
    assert_eq!(h.store.error(), None);
    assert!(!h.store.is_loading());
    assert!(h.notifier.notifications().is_empty());
    assert_eq!(h.storage.load_user(), None);
}

#[test]
fn fetch_user_500_surfaces_generic_error() {
    let h = harness();
    h.api.respond_err(Some(500), None);

    let outcome = block_on(h.store.fetch_user());

    assert_eq!(outcome, UserResolution::Failed("Erro ao buscar usuário".to_owned()));
    assert_eq!(h.store.user(), None);
    assert_eq!(h.store.error(), Some("Erro ao buscar usuário".to_owned()));
    assert!(!h.store.is_loading());

    let notes = h.notifier.notifications();
    assert_eq!(notes[0].kind, NotifyKind::Negative);
    assert_eq!(notes[0].message, "Erro ao buscar usuário");
}

#[test]
fn fetch_user_network_failure_without_status_is_generic() {
    let h = harness();
    h.api.respond_err(None, None);

    let outcome = block_on(h.store.fetch_user());

    assert_eq!(outcome, UserResolution::Failed("Erro ao buscar usuário".to_owned()));
    assert!(h.store.is_resolved());
}

#[test]
fn fetch_user_marks_session_resolved_even_on_401() {
    let h = harness_with_storage(MemorySession::with_user(elessandro()));
    assert!(!h.store.is_resolved());
    h.api.respond_err(Some(401), None);

    let _ = block_on(h.store.fetch_user());

    assert!(h.store.is_resolved());
}
