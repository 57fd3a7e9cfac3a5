//! Shared test doubles for the transport, notifier, and storage seams.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::net::http::{ApiError, ApiResponse, Transport};
use crate::util::notify::{Notification, Notifier, NotifyKind};

/// Scripted transport: responses are consumed in FIFO order regardless of
/// method, and every call is recorded as `"METHOD path"`.
#[derive(Debug, Default)]
pub(crate) struct StubTransport {
    calls: RefCell<Vec<String>>,
    responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
}

impl StubTransport {
    pub fn respond_ok(&self, status: u16, data: serde_json::Value) {
        self.responses
            .borrow_mut()
            .push_back(Ok(ApiResponse { status, data }));
    }

    pub fn respond_err(&self, status: Option<u16>, message: Option<&str>) {
        self.responses.borrow_mut().push_back(Err(ApiError {
            status,
            message: message.map(ToOwned::to_owned),
        }));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn next(&self, call: String) -> Result<ApiResponse, ApiError> {
        self.calls.borrow_mut().push(call);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(ApiResponse { status: 200, data: serde_json::Value::Null }))
    }
}

impl Transport for StubTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.next(format!("GET {path}"))
    }

    async fn post(
        &self,
        path: &str,
        _body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.next(format!("POST {path}"))
    }

    async fn put(
        &self,
        path: &str,
        _body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        self.next(format!("PUT {path}"))
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.next(format!("DELETE {path}"))
    }
}

/// Notifier that records every surfaced notification.
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    notifications: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotifyKind, message: &str) {
        self.notifications
            .borrow_mut()
            .push(Notification { kind, message: message.to_owned() });
    }
}
