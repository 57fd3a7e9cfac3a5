//! Public landing page.

use leptos::prelude::*;

/// Landing page with a link into the app.
#[component]
pub fn IndexPage() -> impl IntoView {
    view! {
        <div class="index-page">
            <h1>"Gestão de Antenas"</h1>
            <p>"Administração de antenas em campo"</p>
            <a href="/app/login" class="index-page__enter">
                "Entrar"
            </a>
        </div>
    }
}
