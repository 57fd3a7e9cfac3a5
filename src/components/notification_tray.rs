//! Toast tray rendering surfaced notifications.

use leptos::prelude::*;

use crate::util::notify::{Notification, NotifyKind};

fn kind_class(kind: NotifyKind) -> &'static str {
    match kind {
        NotifyKind::Positive => "toast toast--positive",
        NotifyKind::Negative => "toast toast--negative",
        NotifyKind::Info => "toast toast--info",
    }
}

/// Fixed tray listing notifications pushed by the stores, newest last.
#[component]
pub fn NotificationTray() -> impl IntoView {
    let toasts = expect_context::<RwSignal<Vec<Notification>>>();

    view! {
        <div class="notification-tray">
            {move || {
                toasts
                    .get()
                    .into_iter()
                    .map(|n| view! { <div class=kind_class(n.kind)>{n.message}</div> })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
