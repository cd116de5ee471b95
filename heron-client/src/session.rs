//! Session state and authentication flows
//!
//! Holds the in-memory session, persists it on every mutation and
//! rehydrates it on startup. The auth endpoints answer in several wire
//! shapes; all of them normalize through the `shared::client` payload
//! types before they touch session state.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use shared::client::{
    CurrentUserPayload, LoginPayload, LoginRequest, LogoutRequest, RefreshPayload, RefreshRequest,
    SessionTokens, UserInfo,
};

use crate::config::ClientConfig;
use crate::error::{error_from_response, ClientError, ClientResult};
use crate::storage::SessionStorage;

/// In-memory session state
///
/// `is_authenticated` is only ever true while an access token is held;
/// the user record may lag behind until `auth/me` has answered.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    pub user: Option<UserInfo>,
    pub tokens: Option<SessionTokens>,
    pub is_authenticated: bool,
}

struct SessionInner {
    state: RwLock<SessionData>,
    storage: SessionStorage,
    /// Bare client for the auth endpoints. Resource calls go through
    /// `HttpClient`, which layers refresh-and-retry on top; routing the
    /// auth calls around it keeps that retry from recursing.
    http: reqwest::Client,
    auth_base: String,
}

/// Shared session manager, cheap to clone
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

impl SessionManager {
    pub fn new(config: &ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(SessionInner {
                state: RwLock::new(SessionData::default()),
                storage: SessionStorage::new(config.session_dir.clone()),
                http,
                auth_base: config.api_base_url.clone(),
            }),
        }
    }

    // ========== Auth flows ==========

    /// Rehydrate the session from disk.
    ///
    /// Returns `true` when a persisted access token was found and is
    /// not provably expired. Expiry is checked locally against the JWT
    /// `exp` claim when one can be decoded; an opaque token gets the
    /// benefit of the doubt until the backend rejects it.
    pub async fn restore(&self) -> ClientResult<bool> {
        let Some(tokens) = self.inner.storage.load_tokens()? else {
            return Ok(false);
        };

        if let Some(exp) = parse_jwt_exp(&tokens.access) {
            let now = chrono::Utc::now().timestamp() as u64;
            if exp <= now {
                tracing::info!("Persisted access token expired, clearing session");
                self.inner.storage.clear()?;
                return Ok(false);
            }
        }

        let user = self.inner.storage.load_user()?;
        {
            let mut state = self.inner.state.write().await;
            state.user = user;
            state.tokens = Some(tokens);
            state.is_authenticated = true;
        }

        tracing::info!("Restored session from disk");
        Ok(true)
    }

    /// Log in and return the signed-in user.
    ///
    /// The login response may or may not carry the user inline; when it
    /// does not, the profile is fetched from `auth/me` before the
    /// session counts as established.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<UserInfo> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let payload: LoginPayload = self.post_auth("api/auth/login", &request, None).await?;
        let (tokens, inline_user) = payload.into_parts();

        let user = match inline_user {
            Some(user) => user,
            None => self.fetch_me(&tokens.access).await?,
        };

        {
            let mut state = self.inner.state.write().await;
            state.user = Some(user.clone());
            state.tokens = Some(tokens.clone());
            state.is_authenticated = true;
        }
        self.persist(&tokens, Some(&user));

        tracing::info!(username = %user.username, "Login successful");
        Ok(user)
    }

    /// Log out.
    ///
    /// The backend revocation call is best-effort; local state and the
    /// persisted files are cleared no matter what it answers.
    pub async fn logout(&self) {
        let (access, refresh) = {
            let state = self.inner.state.read().await;
            (
                state.tokens.as_ref().map(|t| t.access.clone()),
                state.tokens.as_ref().and_then(|t| t.refresh.clone()),
            )
        };

        if let Some(access) = access {
            let request = LogoutRequest {
                refresh_token: refresh,
            };
            if let Err(e) = self
                .post_auth_discard("api/auth/logout", &request, Some(&access))
                .await
            {
                tracing::warn!("Logout request failed: {}", e);
            }
        }

        self.clear_local().await;
        tracing::info!("Logged out");
    }

    /// Exchange the refresh token for a fresh access token.
    ///
    /// Returns `false` instead of an error: no refresh token on hand, a
    /// rejected exchange and a network failure all land in the same
    /// "could not refresh" outcome for the caller.
    pub async fn refresh_access_token(&self) -> bool {
        let refresh = {
            let state = self.inner.state.read().await;
            state.tokens.as_ref().and_then(|t| t.refresh.clone())
        };
        let Some(refresh) = refresh else {
            tracing::debug!("No refresh token available");
            return false;
        };

        let request = RefreshRequest {
            refresh_token: refresh,
        };
        let payload: RefreshPayload = match self.post_auth("api/auth/refresh", &request, None).await
        {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                return false;
            }
        };

        let (access, rotated) = payload.into_tokens();
        let persisted = {
            let mut state = self.inner.state.write().await;
            let state = &mut *state;
            if let Some(tokens) = state.tokens.as_mut() {
                tokens.access = access;
                if rotated.is_some() {
                    tokens.refresh = rotated;
                }
                state.is_authenticated = true;
                Some((tokens.clone(), state.user.clone()))
            } else {
                // Logged out while the exchange was in flight
                None
            }
        };
        let Some((tokens, user)) = persisted else {
            return false;
        };
        self.persist(&tokens, user.as_ref());

        tracing::debug!("Access token refreshed");
        true
    }

    /// Validate the current session, restoring it from disk first when
    /// memory is empty.
    ///
    /// Never returns an error. A definitive rejection from the backend
    /// clears the session and yields `false`; an unreachable backend
    /// keeps the session as-is, so a flaky connection does not log
    /// anyone out.
    pub async fn check_session(&self) -> bool {
        let access = {
            let state = self.inner.state.read().await;
            state.tokens.as_ref().map(|t| t.access.clone())
        };

        let access = match access {
            Some(access) => access,
            None => {
                match self.restore().await {
                    Ok(true) => {}
                    Ok(false) => return false,
                    Err(e) => {
                        tracing::warn!("Session restore failed: {}", e);
                        return false;
                    }
                }
                let state = self.inner.state.read().await;
                match state.tokens.as_ref().map(|t| t.access.clone()) {
                    Some(access) => access,
                    None => return false,
                }
            }
        };

        match self.fetch_me(&access).await {
            Ok(user) => {
                self.store_user(user).await;
                true
            }
            Err(ClientError::Unauthorized) => self.revalidate_after_refresh().await,
            Err(e) => {
                // Backend unreachable or misbehaving; not proof the
                // session is invalid.
                tracing::warn!("Session check inconclusive: {}", e);
                true
            }
        }
    }

    /// Second half of `check_session`: the access token was rejected,
    /// so refresh once and ask `auth/me` again.
    async fn revalidate_after_refresh(&self) -> bool {
        if !self.refresh_access_token().await {
            tracing::info!("Session expired and refresh failed, clearing");
            self.clear_local().await;
            return false;
        }

        let access = {
            let state = self.inner.state.read().await;
            state.tokens.as_ref().map(|t| t.access.clone())
        };
        let Some(access) = access else {
            return false;
        };

        match self.fetch_me(&access).await {
            Ok(user) => {
                self.store_user(user).await;
                true
            }
            Err(ClientError::Unauthorized) => {
                tracing::info!("Session rejected by backend, clearing");
                self.clear_local().await;
                false
            }
            Err(e) => {
                tracing::warn!("Session check inconclusive: {}", e);
                true
            }
        }
    }

    // ========== Accessors ==========

    pub async fn is_authenticated(&self) -> bool {
        self.inner.state.read().await.is_authenticated
    }

    pub async fn current_user(&self) -> Option<UserInfo> {
        self.inner.state.read().await.user.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.inner
            .state
            .read()
            .await
            .tokens
            .as_ref()
            .map(|t| t.access.clone())
    }

    pub async fn tokens(&self) -> Option<SessionTokens> {
        self.inner.state.read().await.tokens.clone()
    }

    /// Snapshot of the whole session state
    pub async fn snapshot(&self) -> SessionData {
        self.inner.state.read().await.clone()
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.inner.storage
    }

    // ========== Internals ==========

    fn auth_url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.auth_base.trim_end_matches('/'), path)
    }

    async fn send_auth<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        bearer: Option<&str>,
    ) -> ClientResult<reqwest::Response> {
        let mut request = self.inner.http.request(method, self.auth_url(path));
        if let Some(token) = bearer {
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

    async fn post_auth<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> ClientResult<T> {
        let response = self
            .send_auth(Method::POST, path, Some(body), bearer)
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, text));
        }
        response.json().await.map_err(Into::into)
    }

    /// POST where the response body does not matter
    async fn post_auth_discard<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> ClientResult<()> {
        let response = self
            .send_auth(Method::POST, path, Some(body), bearer)
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, text));
        }
        Ok(())
    }

    async fn fetch_me(&self, access: &str) -> ClientResult<UserInfo> {
        let response = self
            .send_auth::<()>(Method::GET, "api/auth/me", None, Some(access))
            .await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, text));
        }
        let payload: CurrentUserPayload = response.json().await?;
        Ok(payload.into_user())
    }

    /// Persistence is best-effort; the in-memory session stays valid
    /// whether or not the write lands.
    fn persist(&self, tokens: &SessionTokens, user: Option<&UserInfo>) {
        if let Err(e) = self.inner.storage.save_tokens(tokens) {
            tracing::warn!("Failed to persist session tokens: {}", e);
        }
        if let Some(user) = user {
            if let Err(e) = self.inner.storage.save_user(user) {
                tracing::warn!("Failed to persist user profile: {}", e);
            }
        }
    }

    async fn store_user(&self, user: UserInfo) {
        {
            let mut state = self.inner.state.write().await;
            state.user = Some(user.clone());
            state.is_authenticated = true;
        }
        if let Err(e) = self.inner.storage.save_user(&user) {
            tracing::warn!("Failed to persist user profile: {}", e);
        }
    }

    async fn clear_local(&self) {
        {
            let mut state = self.inner.state.write().await;
            *state = SessionData::default();
        }
        if let Err(e) = self.inner.storage.clear() {
            tracing::warn!("Failed to clear persisted session: {}", e);
        }
    }
}

/// Parse the `exp` claim (Unix timestamp) out of a JWT access token.
///
/// Best-effort only. Opaque tokens and malformed payloads return `None`
/// and expiry is then left for the backend to decide.
pub(crate) fn parse_jwt_exp(token: &str) -> Option<u64> {
    // JWT layout: header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    let payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload_str = String::from_utf8(payload_bytes).ok()?;

    let payload: serde_json::Value = serde_json::from_str(&payload_str).ok()?;
    payload.get("exp")?.as_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fake_jwt(exp: u64) -> String {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"42","exp":{}}}"#, exp));
        format!("{}.{}.sig", header, payload)
    }

    fn manager(dir: &TempDir) -> SessionManager {
        let config = ClientConfig::new("http://localhost:0").with_session_dir(dir.path());
        SessionManager::new(&config)
    }

    #[test]
    fn test_parse_jwt_exp() {
        let token = fake_jwt(1_900_000_000);
        assert_eq!(parse_jwt_exp(&token), Some(1_900_000_000));
    }

    #[test]
    fn test_parse_jwt_exp_rejects_malformed() {
        assert_eq!(parse_jwt_exp("opaque-token"), None);
        assert_eq!(parse_jwt_exp("a.b"), None);
        assert_eq!(parse_jwt_exp("a.!!!.c"), None);

        // Valid base64 but no exp claim
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"42"}"#);
        assert_eq!(parse_jwt_exp(&format!("h.{}.s", payload)), None);
    }

    #[tokio::test]
    async fn test_restore_without_files() {
        let dir = TempDir::new().unwrap();
        let session = manager(&dir);

        assert!(!session.restore().await.unwrap());
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let dir = TempDir::new().unwrap();
        let session = manager(&dir);

        let future_exp = chrono::Utc::now().timestamp() as u64 + 3600;
        session
            .storage()
            .save_tokens(&SessionTokens::new(fake_jwt(future_exp), None))
            .unwrap();

        assert!(session.restore().await.unwrap());
        assert!(session.is_authenticated().await);
        assert!(session.access_token().await.is_some());
    }

    #[tokio::test]
    async fn test_restore_clears_expired_token() {
        let dir = TempDir::new().unwrap();
        let session = manager(&dir);

        let past_exp = chrono::Utc::now().timestamp() as u64 - 3600;
        session
            .storage()
            .save_tokens(&SessionTokens::new(fake_jwt(past_exp), None))
            .unwrap();

        assert!(!session.restore().await.unwrap());
        assert!(!session.is_authenticated().await);
        assert!(!session.storage().access_token_path().exists());
    }

    #[tokio::test]
    async fn test_restore_keeps_opaque_token() {
        let dir = TempDir::new().unwrap();
        let session = manager(&dir);

        session
            .storage()
            .save_tokens(&SessionTokens::new("opaque-token", None))
            .unwrap();

        // No exp claim to read locally, the backend gets to decide
        assert!(session.restore().await.unwrap());
        assert!(session.is_authenticated().await);
    }
}
