//! Auth Session
//!
//! Bearer-token login. The token and user are persisted through a
//! [`TokenStore`] (browser local storage in production) so a reload keeps
//! the session.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::{ApiResponse, ApiResult};
use crate::config::AppConfig;
use crate::http::{HttpClient, TokenSource};
use crate::models::User;

const MSG_LOGIN_FAILED: &str = "Login failed";
const MSG_REGISTER_FAILED: &str = "Registration failed";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: User,
}

/// Key/value persistence for the session
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Non-persistent store, for tests and non-browser targets
#[derive(Default)]
pub struct MemoryTokenStore {
    values: RefCell<HashMap<String, String>>,
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// `window.localStorage`
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageTokenStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalStorageTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("[AUTH] Could not persist {}", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Platform default store
pub fn default_store() -> Box<dyn TokenStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(LocalStorageTokenStore)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(MemoryTokenStore::default())
    }
}

pub struct AuthSession {
    http: HttpClient,
    store: Box<dyn TokenStore>,
    token_key: String,
    user_key: String,
}

impl AuthSession {
    pub fn new(config: &AppConfig, store: Box<dyn TokenStore>) -> Self {
        Self {
            http: HttpClient::new(config.api_base_url.clone()),
            store,
            token_key: config.token_key.clone(),
            user_key: config.user_key.clone(),
        }
    }

    /// `POST /auth/login`; stores the session on success
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<User> {
        let response = self.http.post::<_, AuthResponse>("/auth/login", credentials).await?;
        self.complete_login(response)
    }

    /// `POST /auth/register`; a new account is logged in straight away
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        let response = self.http.post::<_, AuthResponse>("/auth/register", request).await?;
        self.complete_register(response)
    }

    fn complete_login(&self, response: ApiResponse<AuthResponse>) -> ApiResult<User> {
        let auth = response
            .into_data(MSG_LOGIN_FAILED)
            .inspect_err(|e| log::warn!("[AUTH] Login rejected: {}", e))?;
        Ok(self.store_session(auth))
    }

    fn complete_register(&self, response: ApiResponse<AuthResponse>) -> ApiResult<User> {
        let auth = response
            .into_data(MSG_REGISTER_FAILED)
            .inspect_err(|e| log::warn!("[AUTH] Registration rejected: {}", e))?;
        Ok(self.store_session(auth))
    }

    fn store_session(&self, auth: AuthResponse) -> User {
        self.store.set(&self.token_key, &auth.access_token);
        match serde_json::to_string(&auth.user) {
            Ok(json) => self.store.set(&self.user_key, &json),
            Err(e) => log::warn!("[AUTH] Could not serialize user: {}", e),
        }
        log::info!("[AUTH] Logged in as {}", auth.user.email);
        auth.user
    }

    pub fn logout(&self) {
        self.store.remove(&self.token_key);
        self.store.remove(&self.user_key);
        log::info!("[AUTH] Logged out");
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        let json = self.store.get(&self.user_key)?;
        serde_json::from_str(&json).ok()
    }
}

impl TokenSource for AuthSession {
    fn token(&self) -> Option<String> {
        self.store.get(&self.token_key).filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorKind;

    fn session() -> AuthSession {
        AuthSession::new(&AppConfig::default(), Box::new(MemoryTokenStore::default()))
    }

    fn user() -> User {
        User { id: 1, email: "test@example.com".to_string(), name: Some("Test".to_string()), ..Default::default() }
    }

    #[test]
    fn test_starts_logged_out() {
        let session = session();
        assert!(!session.is_logged_in());
        assert_eq!(session.token(), None);
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn test_successful_login_stores_session() {
        let session = session();
        let response = ApiResponse::ok(AuthResponse { access_token: "abc123".to_string(), user: user() });

        assert_eq!(session.complete_login(response).unwrap(), user());
        assert!(session.is_logged_in());
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert_eq!(session.current_user(), Some(user()));

        session.logout();
        assert!(!session.is_logged_in());
        assert_eq!(session.current_user(), None);
    }

    #[test]
    fn test_rejected_login() {
        let session = session();
        let err = session.complete_login(ApiResponse::failure("Invalid credentials")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LogicalFailure);
        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(!session.is_logged_in());

        let err = session
            .complete_login(ApiResponse { success: false, message: None, data: None })
            .unwrap_err();
        assert_eq!(err.to_string(), "Login failed");
    }

    #[test]
    fn test_successful_registration_stores_session() {
        let session = session();
        let response = ApiResponse::ok(AuthResponse { access_token: "new-token".to_string(), user: user() });

        assert_eq!(session.complete_register(response).unwrap(), user());
        assert!(session.is_logged_in());
        assert_eq!(session.token().as_deref(), Some("new-token"));
        assert_eq!(session.current_user(), Some(user()));
    }

    #[test]
    fn test_rejected_registration() {
        let session = session();
        let err = session.complete_register(ApiResponse::failure("Email already exists")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LogicalFailure);
        assert_eq!(err.to_string(), "Email already exists");
        assert!(!session.is_logged_in());

        let err = session
            .complete_register(ApiResponse { success: false, message: None, data: None })
            .unwrap_err();
        assert_eq!(err.to_string(), "Registration failed");
    }

    #[test]
    fn test_register_request_wire_format() {
        let request = RegisterRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["firstName"], "John");
        assert_eq!(value["lastName"], "Doe");
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_auth_response_wire_format() {
        let json = r#"{"accessToken":"t","user":{"id":3,"email":"a@b.c"}}"#;
        let parsed: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "t");
        assert_eq!(parsed.user.name, None);
    }
}
