//! HTTP client for the school API

use std::sync::{Arc, RwLock};

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use schoolctl_core::models::{
    ChangePasswordRequest, DashboardSummary, LoginRequest, LoginResponse, MessageResponse,
    UserProfile,
};

use crate::error::{ClientError, Result};

/// Default server address for local development
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:4000";

/// API client. Clones share the same session token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Start with an existing token (e.g. from `SCHOOLCTL_TOKEN`)
    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token; protected routes without one fail before any I/O.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self.http.request(method, self.url(path));
        match self.token() {
            Some(token) => Ok(builder.bearer_auth(token)),
            None if path.trim_start_matches('/').starts_with("auth/login") => Ok(builder),
            None => Err(ClientError::MissingToken),
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                tracing::debug!("server rejected credentials, dropping stored token");
                self.set_token(None);
            }
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_body(status, &body));
        }

        Ok(response.json().await?)
    }

    /// Log in and keep the token for subsequent calls.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let builder = self
            .request(Method::POST, "auth/login")?
            .json(&LoginRequest::new(email, password));
        let response: LoginResponse = self.send(builder).await?;

        self.set_token(Some(response.token.clone()));
        tracing::info!(user = %response.user.email, "logged in");
        Ok(response)
    }

    pub fn logout(&self) {
        self.set_token(None);
    }

    pub async fn me(&self) -> Result<UserProfile> {
        self.send(self.request(Method::GET, "auth/me")?).await
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<MessageResponse> {
        let body = ChangePasswordRequest {
            current_password: Some(current.to_string()),
            new_password: Some(new.to_string()),
        };
        self.send(self.request(Method::PUT, "auth/password")?.json(&body))
            .await
    }

    pub async fn summary(&self) -> Result<DashboardSummary> {
        self.send(self.request(Method::GET, "summary")?).await
    }

    /// `GET /{resource}`
    pub async fn list<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>> {
        self.send(self.request(Method::GET, resource)?).await
    }

    /// `GET /{resource}/{id}`
    pub async fn get<T: DeserializeOwned>(&self, resource: &str, id: i64) -> Result<T> {
        self.send(self.request(Method::GET, &format!("{}/{}", resource, id))?)
            .await
    }

    /// `POST /{resource}`
    pub async fn create<B, T>(&self, resource: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, resource)?.json(body))
            .await
    }

    /// `PUT /{resource}/{id}`
    pub async fn update<B, T>(&self, resource: &str, id: i64, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(
            self.request(Method::PUT, &format!("{}/{}", resource, id))?
                .json(body),
        )
        .await
    }

    /// `DELETE /{resource}/{id}`
    pub async fn delete(&self, resource: &str, id: i64) -> Result<MessageResponse> {
        self.send(self.request(Method::DELETE, &format!("{}/{}", resource, id))?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_cleanly() {
        let client = ApiClient::new("http://localhost:4000/");
        assert_eq!(client.url("/students"), "http://localhost:4000/students");
        assert_eq!(client.url("students/3"), "http://localhost:4000/students/3");
    }

    #[test]
    fn protected_calls_need_a_token() {
        let client = ApiClient::default();
        assert!(matches!(
            client.request(Method::GET, "students"),
            Err(ClientError::MissingToken)
        ));
        assert!(client.request(Method::POST, "auth/login").is_ok());

        let client = client.with_token("abc");
        assert!(client.request(Method::GET, "students").is_ok());
    }

    #[test]
    fn clones_share_the_session() {
        let client = ApiClient::default();
        let other = client.clone();
        client.set_token(Some("t".into()));
        assert_eq!(other.token().as_deref(), Some("t"));
        other.logout();
        assert!(!client.is_authenticated());
    }
}
