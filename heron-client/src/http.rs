//! HTTP transport with bearer auth and single refresh-and-retry
//!
//! Every request carries the session's access token. A 401 answer
//! triggers at most one token refresh followed by one retried request;
//! when the retry is rejected again the error goes to the caller as-is.

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{error_from_response, ClientResult};
use crate::session::SessionManager;

/// HTTP client for resource API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SessionManager,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>, timeout: u64, session: SessionManager) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<reqwest::Response> {
        let mut request = self.client.request(method, self.url(path));

        if let Some(token) = self.session.access_token().await {
            request = request.header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token),
            );
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    /// Send a request, refreshing the access token once on 401.
    ///
    /// A failed refresh skips the retry and the original 401 surfaces
    /// unchanged, so one rejected request never causes a refresh storm.
    async fn request<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T> {
        let response = self.send(method.clone(), path, body).await?;

        if response.status() == StatusCode::UNAUTHORIZED
            && self.session.refresh_access_token().await
        {
            tracing::debug!(path, "Retrying request with refreshed token");
            let retry = self.send(method, path, body).await?;
            return Self::handle_response(retry).await;
        }

        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, text));
        }
        response.json().await.map_err(Into::into)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request::<T, ()>(Method::GET, path, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request::<T, ()>(Method::POST, path, None).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request::<T, ()>(Method::DELETE, path, None).await
    }
}
