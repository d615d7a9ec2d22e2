//! Account configuration from a credentials file or the environment.
//!
//! The credentials file is a JSON document such as
//!
//! ```json
//! { "app": "acme", "email": "me@acme.com", "password": "secret" }
//! ```
//!
//! `app` expands to `https://<app>.harvestapp.com`; an explicit `uri` wins
//! over it. OAuth2 users provide `client_id` and a `token` object instead of
//! email and password.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::auth::{Auth, OAuth2Token};
use crate::client::HarvestClient;
use crate::error::{HarvestError, Result};

/// Environment variable naming the credentials file.
pub const CREDENTIALS_ENV: &str = "HARVEST_CREDENTIALS";

/// File name of the credentials file in the home directory.
const CREDENTIALS_FILE: &str = ".harvest";

/// Raw contents of a credentials file.
#[derive(Default, Deserialize)]
pub struct CredentialsFile {
    #[serde(default)]
    pub app: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub token: Option<OAuth2Token>,
}

impl std::fmt::Debug for CredentialsFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsFile")
            .field("app", &self.app)
            .field("uri", &self.uri)
            .field("email", &self.email)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Where to connect and how to authenticate.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub uri: String,
    pub auth: Auth,
}

impl HarvestConfig {
    /// Default credentials file: `$HARVEST_CREDENTIALS`, else `~/.harvest`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = env::var_os(CREDENTIALS_ENV) {
            return Some(PathBuf::from(path));
        }
        env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .map(|home| PathBuf::from(home).join(CREDENTIALS_FILE))
    }

    /// Load configuration from a credentials file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or lacks an
    /// account or usable credentials.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let file: CredentialsFile = serde_json::from_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded credentials file");
        Self::from_credentials(file)
    }

    /// Load configuration from `HARVEST_*` environment variables.
    ///
    /// - `HARVEST_URI` or `HARVEST_APP` (required)
    /// - `HARVEST_EMAIL` and `HARVEST_PASSWORD`, or
    /// - `HARVEST_CLIENT_ID` and `HARVEST_ACCESS_TOKEN`
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.is_empty());

        Self::from_credentials(CredentialsFile {
            app: var("HARVEST_APP"),
            uri: var("HARVEST_URI"),
            email: var("HARVEST_EMAIL"),
            password: var("HARVEST_PASSWORD"),
            client_id: var("HARVEST_CLIENT_ID"),
            token: var("HARVEST_ACCESS_TOKEN").map(OAuth2Token::bearer),
        })
    }

    /// Resolve an explicit file, else the environment when it names an
    /// account, else the default credentials file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if env::var_os("HARVEST_URI").is_some() || env::var_os("HARVEST_APP").is_some() {
            return Self::from_env();
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Err(HarvestError::ConfigMissing(
                "no credentials file found and HARVEST_URI/HARVEST_APP not set".to_string(),
            )),
        }
    }

    pub fn from_credentials(file: CredentialsFile) -> Result<Self> {
        let uri = match (file.uri, file.app) {
            (Some(uri), _) => uri,
            (None, Some(app)) => app_uri(&app),
            (None, None) => {
                return Err(HarvestError::ConfigMissing(
                    "account not set: provide `uri` or `app`".to_string(),
                ))
            }
        };

        let auth = Auth::select(
            file.email.as_deref(),
            file.password.as_deref(),
            file.client_id.as_deref(),
            file.token,
        )
        .ok_or_else(|| {
            HarvestError::ConfigMissing(
                "credentials not set: provide email and password, or client_id and token"
                    .to_string(),
            )
        })?;

        Ok(Self { uri, auth })
    }

    /// Build a client for this account.
    pub fn client(&self) -> Result<HarvestClient> {
        tracing::info!("url is {}", self.uri);
        HarvestClient::new(&self.uri, self.auth.clone())
    }
}

/// Account URI for a Harvest subdomain.
pub fn app_uri(app: &str) -> String {
    format!("https://{}.harvestapp.com", app.trim())
}
