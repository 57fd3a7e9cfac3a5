//! Application pages.

pub mod antenna_create;
pub mod antennas;
pub mod index;
pub mod login;

#[cfg(feature = "hydrate")]
pub(crate) use sync::sync_session;

#[cfg(feature = "hydrate")]
mod sync {
    use std::rc::Rc;

    use leptos::prelude::*;

    use crate::app::SharedSession;
    use crate::state::session::SessionState;
    use crate::util::notify::{Notification, NotificationQueue};

    /// Copy the store snapshot and any pending notifications into the
    /// render mirrors after an operation completes.
    pub(crate) fn sync_session(
        session: RwSignal<SessionState>,
        toasts: RwSignal<Vec<Notification>>,
        store: &SharedSession,
        queue: &Rc<NotificationQueue>,
    ) {
        session.set(store.snapshot());
        toasts.update(|t| t.extend(queue.drain()));
    }
}
