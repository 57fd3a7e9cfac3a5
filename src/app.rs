//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::notification_tray::NotificationTray;
use crate::pages::{
    antenna_create::AntennaCreatePage, antennas::AntennasPage, index::IndexPage, login::LoginPage,
};
use crate::state::session::SessionState;
use crate::util::notify::Notification;

#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use crate::net::http::GlooTransport;
#[cfg(feature = "hydrate")]
use crate::state::{antennas::AntennaStore, session::SessionStore, uf::UfStore};
#[cfg(feature = "hydrate")]
use crate::util::{notify::NotificationQueue, storage::LocalStorageSession};

/// Process-wide session store shared through context.
#[cfg(feature = "hydrate")]
pub type SharedSession =
    Rc<SessionStore<GlooTransport, Rc<NotificationQueue>, LocalStorageSession>>;

#[cfg(feature = "hydrate")]
pub type SharedAntennas = Rc<AntennaStore<GlooTransport>>;

#[cfg(feature = "hydrate")]
pub type SharedUfs = Rc<UfStore<GlooTransport>>;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the render mirrors of the stores (signals) plus, in the
/// browser, the stores themselves, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Render mirrors: pages write store snapshots here after operations.
    let session = RwSignal::new(SessionState::default());
    let toasts = RwSignal::new(Vec::<Notification>::new());
    provide_context(session);
    provide_context(toasts);

    #[cfg(feature = "hydrate")]
    {
        let queue = Rc::new(NotificationQueue::new());
        let store: SharedSession = Rc::new(SessionStore::new(
            GlooTransport::auth_client(),
            GlooTransport::api_client(),
            Rc::clone(&queue),
            LocalStorageSession,
        ));
        // Persisted user restored by the store, if any.
        session.set(store.snapshot());

        provide_context(store);
        provide_context(queue);
        provide_context::<SharedAntennas>(Rc::new(AntennaStore::new(
            GlooTransport::api_client(),
        )));
        provide_context::<SharedUfs>(Rc::new(UfStore::new(GlooTransport::api_client())));
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/antenna-admin.css"/>
        <Title text="Antenas"/>

        <Router>
            <NotificationTray/>
            <Routes fallback=|| "Página não encontrada.".into_view()>
                <Route path=StaticSegment("") view=IndexPage/>
                <Route path=(StaticSegment("app"), StaticSegment("login")) view=LoginPage/>
                <Route path=StaticSegment("antennas") view=AntennasPage/>
                <Route path=(StaticSegment("antennas"), StaticSegment("new")) view=AntennaCreatePage/>
            </Routes>
        </Router>
    }
}
