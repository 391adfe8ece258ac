//! HTTP Transport
//!
//! `CarBackend` is the seam between the catalog cache and the REST backend.
//! `HttpBackend` is the reqwest implementation used in the browser.

use std::rc::Rc;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiError, ApiResponse, ApiResult};
use crate::models::{Car, CarDraft, CarId};

/// Supplies the bearer token for outbound requests
pub trait TokenSource {
    fn token(&self) -> Option<String>;
}

/// Raw access to the `/cars` endpoints.
///
/// Implementations return the envelope untouched; interpreting
/// `success: false` is the caller's job. Transport failures are
/// already classified.
#[async_trait(?Send)]
pub trait CarBackend {
    /// `GET /cars`
    async fn list_cars(&self) -> ApiResult<ApiResponse<Vec<Car>>>;

    /// `GET /cars/{id}`
    async fn get_car(&self, id: CarId) -> ApiResult<ApiResponse<Car>>;

    /// `POST /cars`
    async fn create_car(&self, draft: &CarDraft) -> ApiResult<ApiResponse<Car>>;

    /// `PUT /cars/{id}`
    async fn update_car(&self, car: &Car) -> ApiResult<ApiResponse<Car>>;

    /// `DELETE /cars/{id}`
    async fn delete_car(&self, id: CarId) -> ApiResult<ApiResponse<()>>;
}

/// Prefix relative API paths with the base URL.
/// Absolute URLs and bundled assets pass through unchanged.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http") || path.starts_with("assets/") {
        path.to_string()
    } else {
        format!("{}{}", base_url, path)
    }
}

/// Thin JSON client: base URL, optional bearer token, status classification
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    tokens: Option<Rc<dyn TokenSource>>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            tokens: None,
        }
    }

    pub fn with_tokens(mut self, tokens: Rc<dyn TokenSource>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = resolve_url(&self.base_url, path);
        let builder = self.client.request(method, url);
        match self.tokens.as_ref().and_then(|t| t.token()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        self.send(self.request(Method::GET, path), path).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<ApiResponse<T>> {
        self.send(self.request(Method::POST, path).json(body), path).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<ApiResponse<T>> {
        self.send(self.request(Method::PUT, path).json(body), path).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        self.send(self.request(Method::DELETE, path), path).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> ApiResult<ApiResponse<T>> {
        let response = request.send().await.map_err(|e| {
            log::error!("[HTTP] {} unreachable: {}", path, e);
            ApiError::unreachable()
        })?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies usually carry the envelope too; prefer its message
            let message = response
                .json::<ApiResponse<Value>>()
                .await
                .ok()
                .and_then(|body| body.message);
            log::error!("[HTTP] {} failed with status {}", path, status.as_u16());
            return Err(ApiError::from_status(status.as_u16(), message));
        }

        response.json::<ApiResponse<T>>().await.map_err(|e| {
            log::error!("[HTTP] {} returned an unreadable body: {}", path, e);
            ApiError::Unknown(format!("Invalid response from server: {}", e))
        })
    }
}

/// `CarBackend` over the REST endpoints
#[derive(Clone)]
pub struct HttpBackend {
    http: HttpClient,
}

impl HttpBackend {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait(?Send)]
impl CarBackend for HttpBackend {
    async fn list_cars(&self) -> ApiResult<ApiResponse<Vec<Car>>> {
        self.http.get("/cars").await
    }

    async fn get_car(&self, id: CarId) -> ApiResult<ApiResponse<Car>> {
        self.http.get(&format!("/cars/{}", id)).await
    }

    async fn create_car(&self, draft: &CarDraft) -> ApiResult<ApiResponse<Car>> {
        self.http.post("/cars", draft).await
    }

    async fn update_car(&self, car: &Car) -> ApiResult<ApiResponse<Car>> {
        self.http.put(&format!("/cars/{}", car.id), car).await
    }

    async fn delete_car(&self, id: CarId) -> ApiResult<ApiResponse<()>> {
        self.http.delete(&format!("/cars/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(resolve_url("http://localhost:3000", "/cars"), "http://localhost:3000/cars");
        assert_eq!(resolve_url("http://localhost:3000", "/cars/5"), "http://localhost:3000/cars/5");
    }

    #[test]
    fn test_resolve_passthrough() {
        assert_eq!(resolve_url("http://localhost:3000", "https://cdn.example.com/a.png"), "https://cdn.example.com/a.png");
        assert_eq!(resolve_url("http://localhost:3000", "assets/images/bmw.png"), "assets/images/bmw.png");
    }
}
