//! Cross-cutting helpers: notification side-channel and session storage.

pub mod notify;
pub mod storage;
