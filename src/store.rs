//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The catalog
//! cache pushes every recomputed view into `cars`; components only read.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::auth::{default_store, AuthSession};
use crate::catalog::CatalogCache;
use crate::config::AppConfig;
use crate::http::{HttpBackend, HttpClient};
use crate::models::{Car, User};

/// The session's catalog cache over the REST backend
pub type Catalog = CatalogCache<HttpBackend>;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Filtered catalog, as last emitted by the cache
    pub cars: Vec<Car>,
    /// Search box contents
    pub query: String,
    /// A catalog load is in flight
    pub loading: bool,
    /// Banner text for the last failed list operation
    pub error: Option<String>,
    /// Logged-in user, if any
    pub user: Option<User>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Session-scoped services, constructed once in `App`
#[derive(Clone, Copy)]
pub struct Services {
    catalog: StoredValue<Rc<Catalog>, LocalStorage>,
    auth: StoredValue<Rc<AuthSession>, LocalStorage>,
}

impl Services {
    pub fn new(config: &AppConfig) -> Self {
        let auth = Rc::new(AuthSession::new(config, default_store()));
        let http = HttpClient::new(config.api_base_url.clone()).with_tokens(auth.clone());
        let catalog = Rc::new(CatalogCache::new(HttpBackend::new(http)));
        Self {
            catalog: StoredValue::new_local(catalog),
            auth: StoredValue::new_local(auth),
        }
    }

    pub fn catalog(&self) -> Rc<Catalog> {
        self.catalog.get_value()
    }

    pub fn auth(&self) -> Rc<AuthSession> {
        self.auth.get_value()
    }
}

/// Get the services from context
pub fn use_services() -> Services {
    expect_context::<Services>()
}

// ========================
// Store Helper Functions
// ========================

/// Mirror the cache's visible view into the store
pub fn connect_store(store: AppStore, services: Services) {
    services.catalog().subscribe(move |cars| {
        store.cars().set(cars.to_vec());
    });
}

/// Fetch the catalog; clears the search box on success
pub fn refresh_catalog(store: AppStore, services: Services) {
    store.loading().set(true);
    store.error().set(None);
    spawn_local(async move {
        match services.catalog().load().await {
            Ok(cars) => {
                log::debug!("[STORE] Catalog refreshed with {} cars", cars.len());
                store.query().set(String::new());
            }
            Err(e) => store.error().set(Some(e.to_string())),
        }
        store.loading().set(false);
    });
}

/// Apply the search box to the cache
pub fn store_filter(store: AppStore, services: Services, query: String) {
    services.catalog().filter(&query);
    store.query().set(query);
}
