//! Car Catalog App
//!
//! Root component: builds the session services, restores the login,
//! and renders the view for the current hash route.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{Header, ItemDetails, ItemForm, ItemsList, LoginForm, RegisterForm};
use crate::config::AppConfig;
use crate::context::{location_hash, AppContext};
use crate::route::{guard, Route};
use crate::store::{connect_store, refresh_catalog, AppState, AppStateStoreFields, Services};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_env();
    let services = Services::new(&config);
    let store = Store::new(AppState::default());

    let logged_in = services.auth().is_logged_in();
    store.user().set(services.auth().current_user());

    let initial = guard(Route::parse(&location_hash()), logged_in);
    let ctx = AppContext::new(signal(initial), signal(logged_in));

    provide_context(config);
    provide_context(services);
    provide_context(store);
    provide_context(ctx);

    connect_store(store, services);
    refresh_catalog(store, services);

    let _listener = window_event_listener(leptos::ev::hashchange, move |_| ctx.sync_with_location());

    let page = move || match ctx.route.get() {
        Route::Items => view! { <ItemsList /> }.into_any(),
        Route::NewItem => view! { <ItemForm edit=None /> }.into_any(),
        Route::Edit(id) => view! { <ItemForm edit=Some(id) /> }.into_any(),
        Route::Details(id) => view! { <ItemDetails id=id /> }.into_any(),
        Route::Login { return_url } => view! { <LoginForm return_url=return_url /> }.into_any(),
        Route::Register => view! { <RegisterForm /> }.into_any(),
    };

    view! {
        <div class="app-layout">
            <Header />
            <main class="main-content">{page}</main>
        </div>
    }
}
