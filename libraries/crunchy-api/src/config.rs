/// Client configuration
use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file, read from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "crunchyroll.toml";

/// Prefix of the environment variables overriding the configuration.
pub const ENV_PREFIX: &str = "CRUNCHYROLL";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_client_version")]
    pub client_version: String,

    #[serde(default = "default_device_type")]
    pub device_type: String,

    /// Application access token sent with `start_session`
    pub access_token: String,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl ClientConfig {
    /// Config with defaults everywhere except the access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            client_version: default_client_version(),
            device_type: default_device_type(),
            access_token: access_token.into(),
            locale: default_locale(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_timeouts(mut self, request: Duration, connect: Duration) -> Self {
        self.request_timeout_secs = request.as_secs();
        self.connect_timeout_secs = connect.as_secs();
        self
    }

    /// Load configuration from `crunchyroll.toml` and the environment
    pub fn load() -> Result<Self> {
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        let file = path.exists().then_some(path);
        Self::load_from_sources(
            file.as_deref(),
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    /// Load configuration from an explicit file, still honouring the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_sources(
            Some(path.as_ref()),
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    fn load_from_sources(file: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = file {
            settings = settings.add_source(config::File::from(path));
        }

        // Environment wins over the file
        settings = settings.add_source(env);

        let config: ClientConfig = settings.build()?.try_deserialize()?;
        config.normalized()
    }

    /// Validate and normalize the configuration
    pub fn normalized(mut self) -> Result<Self> {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        if self.access_token.is_empty() {
            return Err(ClientError::Config("access_token must be set".into()));
        }

        if self.locale.is_empty() {
            return Err(ClientError::Config("locale cannot be empty".into()));
        }

        if self.api_version.is_empty() {
            return Err(ClientError::Config("api_version cannot be empty".into()));
        }

        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ClientError::Config("timeouts must be at least one second".into()));
        }

        Ok(())
    }

    /// Endpoint URL of a remote method, e.g. `.../start_session.0.json`
    pub fn endpoint(&self, method: &str) -> String {
        format!("{}/{}.{}.json", self.base_url, method, self.api_version)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_base_url() -> String {
    "https://api.crunchyroll.com".to_string()
}

fn default_api_version() -> String {
    "0".to_string()
}

fn default_client_version() -> String {
    "1.1.21.0".to_string()
}

fn default_device_type() -> String {
    "com.crunchyroll.windows.desktop".to_string()
}

fn default_locale() -> String {
    "enUS".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}
