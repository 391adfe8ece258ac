//! Route Table
//!
//! Hash-based paths for the views. Unknown paths land on the list; editing
//! routes need a session.

use crate::models::CarId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Items,
    NewItem,
    Details(CarId),
    Edit(CarId),
    Login { return_url: Option<String> },
    Register,
}

impl Route {
    /// Parse a path such as `/items/3/edit`. A leading `#` is ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.trim_start_matches('#');
        let path = path.split('?').next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["items", "new"] => Route::NewItem,
            ["items", id] => id.parse().map(Route::Details).unwrap_or(Route::Items),
            ["items", id, "edit"] => id.parse().map(Route::Edit).unwrap_or(Route::Items),
            ["login"] => Route::Login { return_url: None },
            ["register"] => Route::Register,
            _ => Route::Items,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Items => "/items".to_string(),
            Route::NewItem => "/items/new".to_string(),
            Route::Details(id) => format!("/items/{}", id),
            Route::Edit(id) => format!("/items/{}/edit", id),
            Route::Login { .. } => "/login".to_string(),
            Route::Register => "/register".to_string(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::NewItem | Route::Edit(_))
    }
}

/// Redirect protected routes to the login view, remembering where to return
pub fn guard(route: Route, logged_in: bool) -> Route {
    if route.requires_auth() && !logged_in {
        Route::Login { return_url: Some(route.path()) }
    } else {
        route
    }
}
