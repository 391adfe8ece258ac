//! Application Context
//!
//! Navigation and session signals shared via Leptos Context API.

use leptos::prelude::*;

use crate::route::{guard, Route};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Active view - read
    pub route: ReadSignal<Route>,
    /// Active view - write
    set_route: WriteSignal<Route>,
    /// Whether a bearer token is present - read
    pub logged_in: ReadSignal<bool>,
    /// Whether a bearer token is present - write
    set_logged_in: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(
        route: (ReadSignal<Route>, WriteSignal<Route>),
        logged_in: (ReadSignal<bool>, WriteSignal<bool>),
    ) -> Self {
        Self {
            route: route.0,
            set_route: route.1,
            logged_in: logged_in.0,
            set_logged_in: logged_in.1,
        }
    }

    /// Switch views and mirror the path into the location hash
    pub fn navigate(&self, route: Route) {
        let route = guard(route, self.logged_in.get_untracked());
        set_location_hash(&route.path());
        self.set_route.set(route);
    }

    /// Follow a hash the user typed or reached with back/forward
    pub fn sync_with_location(&self) {
        let route = guard(Route::parse(&location_hash()), self.logged_in.get_untracked());
        if route != self.route.get_untracked() {
            self.set_route.set(route);
        }
    }

    pub fn set_logged_in(&self, logged_in: bool) {
        self.set_logged_in.set(logged_in);
    }
}

pub fn location_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

fn set_location_hash(path: &str) {
    if let Some(window) = web_sys::window() {
        if window.location().set_hash(path).is_err() {
            log::warn!("[NAV] Could not update location hash to {}", path);
        }
    }
}
