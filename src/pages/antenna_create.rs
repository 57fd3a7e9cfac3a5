//! Antenna registration form with UF selection.

use leptos::prelude::*;

use crate::state::session::SessionState;
use crate::state::uf::UfOption;

/// Create-antenna form. The UF select is fed from the reference-data
/// cache; dates are typed in `dd/mm/yyyy` and converted on submit.
#[component]
pub fn AntennaCreatePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let description = RwSignal::new(String::new());
    let serial_number = RwSignal::new(String::new());
    let deployment_date = RwSignal::new(String::new());
    let uf = RwSignal::new("AC".to_owned());
    let ufs = RwSignal::new(Vec::<UfOption>::new());
    let submit_error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    let store = StoredValue::new_local(expect_context::<crate::app::SharedSession>());
    #[cfg(feature = "hydrate")]
    let antennas = StoredValue::new_local(expect_context::<crate::app::SharedAntennas>());
    #[cfg(feature = "hydrate")]
    let uf_store = StoredValue::new_local(expect_context::<crate::app::SharedUfs>());
    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    // Guard on mount, then fill the UF select from the cache.
    #[cfg(feature = "hydrate")]
    {
        use crate::router::guard::{self, GuardOutcome};
        use crate::router::routes::route_by_name;

        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let Some(route) = route_by_name("antennas-create") else {
                return;
            };
            match guard::before_each(&store.get_value(), &route).await {
                GuardOutcome::Redirect(name) => {
                    session.set(store.get_value().snapshot());
                    if let Some(target) = route_by_name(name) {
                        navigate(target.path, leptos_router::NavigateOptions::default());
                    }
                }
                GuardOutcome::Allow => match uf_store.get_value().fetch().await {
                    Ok(options) => ufs.set(options),
                    Err(err) => log::warn!("UF list unavailable: {err}"),
                },
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        #[cfg(feature = "hydrate")]
        {
            use crate::router::routes::{ROUTE_LANDING, route_by_name};
            use crate::state::antennas::AntennaForm;

            let navigate = navigate.clone();
            let form = AntennaForm {
                description: description.get_untracked(),
                serial_number: serial_number.get_untracked(),
                deployment_date: deployment_date.get_untracked(),
                state: uf.get_untracked(),
                ..AntennaForm::default()
            };

            leptos::task::spawn_local(async move {
                antennas.get_value().set_form(form);
                match antennas.get_value().submit_form().await {
                    Ok(_) => {
                        submit_error.set(None);
                        if let Some(target) = route_by_name(ROUTE_LANDING) {
                            navigate(target.path, leptos_router::NavigateOptions::default());
                        }
                    }
                    Err(err) => submit_error.set(Some(err.message)),
                }
            });
        }
    };

    view! {
        <div class="antenna-create-page">
            <h1>"Nova antena"</h1>
            <form class="antenna-create-page__form" on:submit=on_submit>
                <label>
                    "Descrição"
                    <input
                        type="text"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Número de série"
                    <input
                        type="text"
                        prop:value=move || serial_number.get()
                        on:input=move |ev| serial_number.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Data de instalação (dd/mm/aaaa)"
                    <input
                        type="text"
                        prop:value=move || deployment_date.get()
                        on:input=move |ev| deployment_date.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "UF"
                    <select on:change=move |ev| uf.set(event_target_value(&ev))>
                        {move || {
                            ufs.get()
                                .into_iter()
                                .map(|o| {
                                    let selected = o.value == uf.get();
                                    view! {
                                        <option value=o.value selected=selected>
                                            {o.label}
                                        </option>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </select>
                </label>
                <button type="submit" disabled=move || session.get().loading>
                    "Cadastrar"
                </button>
            </form>
            <Show when=move || submit_error.get().is_some()>
                <p class="antenna-create-page__error">
                    {move || submit_error.get().unwrap_or_default()}
                </p>
            </Show>
        </div>
    }
}
