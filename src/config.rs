//! Application Configuration
//!
//! Defaults mirror the reference deployment; a build can override the
//! backend URL and thumbnail window through compile-time environment variables.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_THUMBNAIL_WINDOW: usize = 5;
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "assets/images/no-car-image.png";
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";
pub const DEFAULT_USER_KEY: &str = "user_data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prepended to relative backend paths
    pub api_base_url: String,
    /// Thumbnails shown at once on the detail view
    pub thumbnail_window: usize,
    /// Shown when a car has neither gallery nor primary image
    pub placeholder_image: String,
    /// Local storage key for the bearer token
    pub token_key: String,
    /// Local storage key for the serialized user
    pub user_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            thumbnail_window: DEFAULT_THUMBNAIL_WINDOW,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            user_key: DEFAULT_USER_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults plus `CATALOG_API_URL` / `CATALOG_THUMBNAIL_WINDOW` baked in at build time.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            option_env!("CATALOG_API_URL"),
            option_env!("CATALOG_THUMBNAIL_WINDOW"),
        )
    }

    fn with_overrides(mut self, api_url: Option<&str>, window: Option<&str>) -> Self {
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        match window.map(|w| w.trim().parse::<usize>()) {
            Some(Ok(n)) if n > 0 => self.thumbnail_window = n,
            Some(_) => log::warn!("[CONFIG] Ignoring invalid CATALOG_THUMBNAIL_WINDOW"),
            None => {}
        }
        self
    }
}
