//! Shared UI components.

pub mod notification_tray;
