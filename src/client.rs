//! Harvest API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Endpoint operations live on the resource types in [`crate::resources`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::auth::{Auth, AuthMode, OAuth2Token};
use crate::error::{HarvestError, Result};
use crate::response::HarvestResponse;

const USER_AGENT: &str = concat!("harvestapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Harvest API client.
///
/// Every call issues exactly one HTTP request and hands back the decoded
/// document (or the raw body when it is not JSON). There is no retry and no
/// status-code interpretation.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use harvestapi::{Auth, HarvestClient};
///
/// # fn example() -> harvestapi::Result<()> {
/// let client = HarvestClient::new(
///     "https://acme.harvestapp.com",
///     Auth::basic("me@acme.com", "secret"),
/// )?;
/// assert_eq!(client.uri(), "https://acme.harvestapp.com");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HarvestClient {
    http: Client,
    uri: Arc<str>,
    base_url: Arc<Url>,
    auth: Arc<Auth>,
}

impl std::fmt::Debug for HarvestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarvestClient")
            .field("uri", &&*self.uri)
            .field("auth", &self.auth.mode())
            .finish_non_exhaustive()
    }
}

impl HarvestClient {
    /// Create a client for the account at `uri`.
    ///
    /// A trailing `/` is stripped from the URI.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::InvalidUri`] if the URI has no scheme or host,
    /// or [`HarvestError::InvalidCredentials`] if basic credentials cannot be
    /// encoded into a header.
    pub fn new(uri: &str, auth: Auth) -> Result<Self> {
        let trimmed = uri.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|_| HarvestError::InvalidUri(uri.to_string()))?;
        if parsed.cannot_be_a_base() || parsed.host_str().map_or(true, str::is_empty) {
            return Err(HarvestError::InvalidUri(uri.to_string()));
        }

        // Paths are joined relative to the account root.
        let base_url = Url::parse(&format!("{trimmed}/"))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(value) = auth.default_header()? {
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(HarvestError::Transport)?;

        tracing::debug!(uri = trimmed, auth = %auth.mode(), "created harvest client");

        Ok(Self {
            http,
            uri: Arc::from(trimmed),
            base_url: Arc::new(base_url),
            auth: Arc::new(auth),
        })
    }

    /// Shorthand for [`HarvestClient::new`] with [`Auth::basic`].
    pub fn with_basic(uri: &str, email: &str, password: &str) -> Result<Self> {
        Self::new(uri, Auth::basic(email, password))
    }

    /// Shorthand for [`HarvestClient::new`] with [`Auth::oauth2`].
    pub fn with_oauth2(uri: &str, client_id: &str, token: OAuth2Token) -> Result<Self> {
        Self::new(uri, Auth::oauth2(client_id, token))
    }

    /// The account URI, without a trailing slash.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth.mode()
    }

    /// The login email when using basic authentication.
    pub fn email(&self) -> Option<&str> {
        match &*self.auth {
            Auth::Basic { email, .. } => Some(email.as_str()),
            Auth::OAuth2 { .. } => None,
        }
    }

    /// The OAuth2 client id when using OAuth2.
    pub fn client_id(&self) -> Option<&str> {
        match &*self.auth {
            Auth::OAuth2 { client_id, .. } => Some(client_id.as_str()),
            Auth::Basic { .. } => None,
        }
    }

    /// The OAuth2 token when using OAuth2.
    pub fn token(&self) -> Option<&OAuth2Token> {
        match &*self.auth {
            Auth::OAuth2 { token, .. } => Some(token),
            Auth::Basic { .. } => None,
        }
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<HarvestResponse> {
        let builder = self.request(Method::GET, path)?;
        self.execute(Method::GET, builder).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<HarvestResponse> {
        let builder = self.request(Method::GET, path)?.query(query);
        self.execute(Method::GET, builder).await
    }

    /// Make a POST request with an optional JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post(&self, path: &str, body: Option<&Value>) -> Result<HarvestResponse> {
        let builder = with_body(self.request(Method::POST, path)?, body);
        self.execute(Method::POST, builder).await
    }

    /// Make a POST request with query parameters and an optional JSON body.
    #[tracing::instrument(skip(self, query, body))]
    pub async fn post_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        body: Option<&Value>,
    ) -> Result<HarvestResponse> {
        let builder = with_body(self.request(Method::POST, path)?.query(query), body);
        self.execute(Method::POST, builder).await
    }

    /// Make a PUT request with an optional JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put(&self, path: &str, body: Option<&Value>) -> Result<HarvestResponse> {
        let builder = with_body(self.request(Method::PUT, path)?, body);
        self.execute(Method::PUT, builder).await
    }

    /// Make a DELETE request. The response body is never decoded.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<HarvestResponse> {
        let builder = self.request(Method::DELETE, path)?;
        self.execute(Method::DELETE, builder).await
    }

    /// Start a request for `path` (relative to the account root) with the
    /// credentials attached.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        let builder = self.http.request(method, url);

        Ok(match &*self.auth {
            Auth::Basic {
                email,
                password,
                in_header: false,
            } => builder.basic_auth(email, Some(password)),
            Auth::Basic { .. } => builder,
            Auth::OAuth2 { token, .. } => builder.bearer_auth(&token.access_token),
        })
    }

    async fn execute(&self, method: Method, builder: RequestBuilder) -> Result<HarvestResponse> {
        let response = builder.send().await.map_err(HarvestError::Transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(HarvestError::Transport)?;

        tracing::debug!(%method, status, bytes = body.len(), "harvest response");

        if method == Method::DELETE {
            return Ok(HarvestResponse::Raw { status, body });
        }
        Ok(HarvestResponse::decode(status, body))
    }
}

fn with_body(builder: RequestBuilder, body: Option<&Value>) -> RequestBuilder {
    match body {
        Some(body) => builder.json(body),
        None => builder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = HarvestClient::with_basic("https://acme.harvestapp.com", "me@acme.com", "hunter2")
            .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("HarvestClient"));
        assert!(debug.contains("acme.harvestapp.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_uri_trailing_slash_is_stripped() {
        let client1 = HarvestClient::with_basic("https://acme.harvestapp.com", "a@b.c", "pw").unwrap();
        let client2 = HarvestClient::with_basic("https://acme.harvestapp.com/", "a@b.c", "pw").unwrap();
        assert_eq!(client1.uri(), "https://acme.harvestapp.com");
        assert_eq!(client1.uri(), client2.uri());
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_invalid_uri_rejected() {
        for uri in ["acme.harvestapp.com", "", "mailto:me@acme.com", "/relative/path"] {
            let err = HarvestClient::with_basic(uri, "a@b.c", "pw").unwrap_err();
            assert!(matches!(err, HarvestError::InvalidUri(_)), "{uri} should be rejected");
        }
    }

    #[test]
    fn test_accessors_follow_auth_mode() {
        let basic = HarvestClient::with_basic("https://acme.harvestapp.com", " me@acme.com ", "pw")
            .unwrap();
        assert_eq!(basic.auth_mode(), AuthMode::Basic);
        assert_eq!(basic.email(), Some("me@acme.com"));
        assert!(basic.client_id().is_none());

        let oauth = HarvestClient::with_oauth2(
            "https://acme.harvestapp.com",
            "client-1",
            OAuth2Token::bearer("tok"),
        )
        .unwrap();
        assert_eq!(oauth.auth_mode(), AuthMode::OAuth2);
        assert_eq!(oauth.client_id(), Some("client-1"));
        assert_eq!(oauth.token().map(|t| t.access_token.as_str()), Some("tok"));
        assert!(oauth.email().is_none());
    }

    #[test]
    fn test_paths_join_under_account_prefix() {
        let client = HarvestClient::with_basic("https://example.com/harvest", "a@b.c", "pw").unwrap();
        let url = client.base_url().join("clients/5").unwrap();
        assert_eq!(url.as_str(), "https://example.com/harvest/clients/5");
    }
}
