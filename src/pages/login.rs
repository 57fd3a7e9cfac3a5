//! Login page posting credentials through the session store.

use leptos::prelude::*;

use crate::state::session::SessionState;

/// Login form. Already-authenticated visitors are redirected to the
/// antenna list by the navigation guard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    let store = StoredValue::new_local(expect_context::<crate::app::SharedSession>());
    #[cfg(feature = "hydrate")]
    let queue =
        StoredValue::new_local(expect_context::<std::rc::Rc<crate::util::notify::NotificationQueue>>());
    #[cfg(feature = "hydrate")]
    let toasts = expect_context::<RwSignal<Vec<crate::util::notify::Notification>>>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    // Guard on mount: send logged-in visitors to the landing route.
    #[cfg(feature = "hydrate")]
    {
        use crate::router::guard::{self, GuardOutcome};
        use crate::router::routes::{ROUTE_LOGIN, route_by_name};

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let Some(route) = route_by_name(ROUTE_LOGIN) else {
                return;
            };
            if let GuardOutcome::Redirect(name) = guard::before_each(&store.get_value(), &route).await
            {
                session.set(store.get_value().snapshot());
                if let Some(target) = route_by_name(name) {
                    navigate(target.path, leptos_router::NavigateOptions::default());
                }
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        #[cfg(feature = "hydrate")]
        {
            use crate::net::types::Credentials;
            use crate::router::routes::{ROUTE_LANDING, route_by_name};

            let navigate = navigate.clone();
            let credentials =
                Credentials { email: email.get_untracked(), password: password.get_untracked() };

            leptos::task::spawn_local(async move {
                let result = store.get_value().login(&credentials).await;
                crate::pages::sync_session(session, toasts, &store.get_value(), &queue.get_value());
                if result.is_ok() {
                    if let Some(target) = route_by_name(ROUTE_LANDING) {
                        navigate(target.path, leptos_router::NavigateOptions::default());
                    }
                }
            });
        }
    };

    view! {
        <div class="login-page">
            <h1>"Entrar"</h1>
            <form class="login-page__form" on:submit=on_submit>
                <label>
                    "E-mail"
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Senha"
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=move || session.get().loading>
                    {move || if session.get().loading { "Entrando..." } else { "Entrar" }}
                </button>
            </form>
            <Show when=move || session.get().error.is_some()>
                <p class="login-page__error">
                    {move || session.get().error.unwrap_or_default()}
                </p>
            </Show>
        </div>
    }
}
