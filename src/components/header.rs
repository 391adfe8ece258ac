//! Header Component
//!
//! App title, catalog search box and the session controls.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::route::Route;
use crate::store::{store_filter, use_app_store, use_services, AppStateStoreFields};

/// Top bar shown on every view
#[component]
pub fn Header() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let services = use_services();

    let on_search = move |ev| {
        store_filter(store, services, event_target_value(&ev));
    };

    let logout = move |_| {
        services.auth().logout();
        ctx.set_logged_in(false);
        store.user().set(None);
        ctx.navigate(Route::Items);
    };

    let user_label = move || {
        store
            .user()
            .get()
            .map(|u| u.display_name())
            .unwrap_or_default()
    };

    view! {
        <header class="app-header">
            <a class="app-title" href="#/items">"Car Catalog"</a>

            <input
                type="search"
                class="search-input"
                placeholder="Search by brand or model"
                prop:value=move || store.query().get()
                on:input=on_search
            />

            <div class="session-controls">
                <Show
                    when=move || ctx.logged_in.get()
                    fallback=move || view! {
                        <button
                            class="btn"
                            on:click=move |_| ctx.navigate(Route::Login { return_url: None })
                        >
                            "Log in"
                        </button>
                        <button class="btn" on:click=move |_| ctx.navigate(Route::Register)>
                            "Register"
                        </button>
                    }
                >
                    <span class="user-name">{user_label}</span>
                    <button class="btn" on:click=logout>"Log out"</button>
                </Show>
            </div>
        </header>
    }
}
