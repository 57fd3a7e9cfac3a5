//! Antenna list page: paginated table, ranking, and logout.

use leptos::prelude::*;

use crate::state::antennas::AntennaListState;
use crate::state::session::SessionState;

/// Paginated antenna list. Requires an authenticated session; anonymous
/// visitors are redirected to login by the navigation guard.
#[component]
pub fn AntennasPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let list = RwSignal::new(AntennaListState::default());

    #[cfg(feature = "hydrate")]
    let store = StoredValue::new_local(expect_context::<crate::app::SharedSession>());
    #[cfg(feature = "hydrate")]
    let antennas = StoredValue::new_local(expect_context::<crate::app::SharedAntennas>());
    #[cfg(feature = "hydrate")]
    let queue =
        StoredValue::new_local(expect_context::<std::rc::Rc<crate::util::notify::NotificationQueue>>());
    #[cfg(feature = "hydrate")]
    let toasts = expect_context::<RwSignal<Vec<crate::util::notify::Notification>>>();
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    // Guard on mount, then load the first page.
    #[cfg(feature = "hydrate")]
    {
        use crate::router::guard::{self, GuardOutcome};
        use crate::router::routes::{ROUTE_LANDING, route_by_name};

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let Some(route) = route_by_name(ROUTE_LANDING) else {
                return;
            };
            let outcome = guard::before_each(&store.get_value(), &route).await;
            session.set(store.get_value().snapshot());
            match outcome {
                GuardOutcome::Redirect(name) => {
                    if let Some(target) = route_by_name(name) {
                        navigate(target.path, leptos_router::NavigateOptions::default());
                    }
                }
                GuardOutcome::Allow => {
                    let _ = antennas.get_value().load().await;
                    list.set(antennas.get_value().snapshot());
                }
            }
        });
    }

    let set_page = move |page: u64| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                let _ = antennas.get_value().set_page(page).await;
                list.set(antennas.get_value().snapshot());
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = page;
        }
    };

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use crate::router::routes::{ROUTE_LOGIN, route_by_name};

            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                // Session is torn down locally even when the call fails.
                let _ = store.get_value().logout().await;
                crate::pages::sync_session(session, toasts, &store.get_value(), &queue.get_value());
                if let Some(target) = route_by_name(ROUTE_LOGIN) {
                    navigate(target.path, leptos_router::NavigateOptions::default());
                }
            });
        }
    };

    let user_name = move || session.get().user.map(|u| u.name).unwrap_or_default();

    view! {
        <div class="antennas-page">
            <header class="antennas-page__header">
                <h1>"Antenas"</h1>
                <span class="antennas-page__user">{user_name}</span>
                <button class="antennas-page__logout" on:click=on_logout>
                    "Sair"
                </button>
            </header>

            <Show when=move || list.get().loading>
                <p>"Carregando antenas..."</p>
            </Show>

            <table class="antennas-page__table">
                <thead>
                    <tr>
                        <th>"Série"</th>
                        <th>"Descrição"</th>
                        <th>"UF"</th>
                        <th>"Instalação"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        list.get()
                            .antennas
                            .into_iter()
                            .map(|a| {
                                view! {
                                    <tr>
                                        <td>{a.serial_number.unwrap_or_default()}</td>
                                        <td>{a.description.unwrap_or_default()}</td>
                                        <td>{a.state.unwrap_or_default()}</td>
                                        <td>{a.deployment_date.unwrap_or_default()}</td>
                                    </tr>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </tbody>
            </table>

            <nav class="antennas-page__pagination">
                {move || {
                    let state = list.get();
                    let last = state.pagination.last_page.max(1);
                    (1..=last)
                        .map(|page| {
                            let current = page == state.current_page;
                            view! {
                                <button class:active=current on:click=move |_| set_page(page)>
                                    {page}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </nav>

            <section class="antennas-page__ranking">
                <h2>"Ranking"</h2>
                <ol>
                    {move || {
                        list.get()
                            .ranking
                            .into_iter()
                            .map(|r| view! { <li>{format!("#{}: {} pts", r.id, r.score)}</li> })
                            .collect::<Vec<_>>()
                    }}
                </ol>
            </section>
        </div>
    }
}
