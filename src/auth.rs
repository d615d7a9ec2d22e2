//! Credentials accepted by the Harvest API.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};

use crate::error::{HarvestError, Result};

/// How requests are authenticated.
#[derive(Clone)]
pub enum Auth {
    /// HTTP basic authentication with the account email and password.
    Basic {
        email: String,
        password: String,
        /// Precompute the `Authorization` header once instead of attaching
        /// the credentials to every request.
        in_header: bool,
    },
    /// OAuth2 bearer authentication.
    OAuth2 { client_id: String, token: OAuth2Token },
}

/// An OAuth2 token as issued by Harvest.
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuth2Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl OAuth2Token {
    /// Wrap a bare access token.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: Some("Bearer".to_string()),
            refresh_token: None,
            expires_in: None,
        }
    }
}

impl std::fmt::Debug for OAuth2Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Token")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

/// The authentication scheme in use, without its secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Basic,
    OAuth2,
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::Basic => f.write_str("Basic"),
            AuthMode::OAuth2 => f.write_str("OAuth2"),
        }
    }
}

impl Auth {
    /// Basic credentials sent in a precomputed header.
    ///
    /// Surrounding whitespace is stripped from the email.
    pub fn basic(email: &str, password: impl Into<String>) -> Self {
        Auth::Basic {
            email: email.trim().to_string(),
            password: password.into(),
            in_header: true,
        }
    }

    /// OAuth2 credentials.
    pub fn oauth2(client_id: impl Into<String>, token: OAuth2Token) -> Self {
        Auth::OAuth2 {
            client_id: client_id.into(),
            token,
        }
    }

    /// Keep basic credentials out of the default headers; they are attached
    /// to each request instead. No effect on OAuth2.
    #[must_use]
    pub fn per_request(self) -> Self {
        match self {
            Auth::Basic {
                email, password, ..
            } => Auth::Basic {
                email,
                password,
                in_header: false,
            },
            other => other,
        }
    }

    /// Pick an authentication scheme from whichever credentials are present.
    ///
    /// Email and password take precedence over an OAuth2 client id and token.
    pub fn select(
        email: Option<&str>,
        password: Option<&str>,
        client_id: Option<&str>,
        token: Option<OAuth2Token>,
    ) -> Option<Self> {
        match (email, password) {
            (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => {
                return Some(Auth::basic(e, p));
            }
            _ => {}
        }
        match (client_id, token) {
            (Some(id), Some(t)) if !id.is_empty() && !t.access_token.is_empty() => {
                Some(Auth::oauth2(id, t))
            }
            _ => None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Auth::Basic { .. } => AuthMode::Basic,
            Auth::OAuth2 { .. } => AuthMode::OAuth2,
        }
    }

    /// Build the precomputed `Authorization` header, if this scheme uses one.
    pub(crate) fn default_header(&self) -> Result<Option<HeaderValue>> {
        match self {
            Auth::Basic {
                email,
                password,
                in_header: true,
            } => {
                let encoded = STANDARD.encode(format!("{email}:{password}"));
                let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
                    .map_err(|e| HarvestError::InvalidCredentials(e.to_string()))?;
                value.set_sensitive(true);
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Basic {
                email, in_header, ..
            } => f
                .debug_struct("Basic")
                .field("email", email)
                .field("in_header", in_header)
                .finish_non_exhaustive(),
            Auth::OAuth2 { client_id, .. } => f
                .debug_struct("OAuth2")
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}
