//! Items List Component
//!
//! The catalog grid with its loading, error and empty states.

use leptos::prelude::*;

use crate::components::ItemCard;
use crate::context::AppContext;
use crate::route::Route;
use crate::store::{refresh_catalog, use_app_store, use_services, AppStateStoreFields};

#[component]
pub fn ItemsList() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let store = use_app_store();
    let services = use_services();

    let count_label = move || {
        let shown = store.cars().read().len();
        let total = services.catalog().len();
        if shown == total {
            format!("{} cars", total)
        } else {
            format!("{} of {} cars", shown, total)
        }
    };

    view! {
        <section class="items-list">
            <div class="items-toolbar">
                <span class="item-count">{count_label}</span>
                <Show when=move || ctx.logged_in.get()>
                    <button class="btn btn-primary" on:click=move |_| ctx.navigate(Route::NewItem)>
                        "Add car"
                    </button>
                </Show>
            </div>

            {move || store.error().get().map(|message| view! {
                <div class="error-banner">
                    <span>{message}</span>
                    <button class="btn" on:click=move |_| refresh_catalog(store, services)>"Retry"</button>
                </div>
            })}

            <Show when=move || store.loading().get()>
                <p class="loading">"Loading cars..."</p>
            </Show>

            <Show when=move || !store.loading().get() && store.error().get().is_none() && store.cars().read().is_empty()>
                <p class="empty-state">
                    {move || if store.query().get().is_empty() {
                        "No cars in the catalog yet.".to_string()
                    } else {
                        format!("No cars match \"{}\".", store.query().get())
                    }}
                </p>
            </Show>

            <div class="items-grid">
                {move || store.cars().get()
                    .into_iter()
                    .map(|car| view! { <ItemCard car=car /> })
                    .collect_view()}
            </div>
        </section>
    }
}
