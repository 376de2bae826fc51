//! Main Crunchyroll API client.

use crate::config::ClientConfig;
use crate::device::DeviceIdentity;
use crate::error::{ClientError, Result};
use crate::session::SessionManager;
use crate::transport::{HttpTransport, Remote, Transport};
use crate::types::{ApiResponse, Field, ListMediaOptions, MediaType, ObjectType};
use tracing::{info, warn};

/// Client for the Crunchyroll API.
///
/// A client only exists in a logged-in state: [`CrunchyrollClient::connect`]
/// logs in before returning. Every call goes through the session retry
/// policy, so callers must check [`ApiResponse::is_error`] on the result.
///
/// # Example
///
/// ```ignore
/// use crunchy_api::{ClientConfig, CrunchyrollClient, ObjectType};
///
/// let config = ClientConfig::load()?;
/// let mut client = CrunchyrollClient::connect(config, "user", "password")?;
///
/// let series = client.info(ObjectType::Series, 272199)?;
/// if !series.is_error() {
///     println!("{:?}", series.data());
/// }
///
/// client.logout()?;
/// ```
#[derive(Debug)]
pub struct CrunchyrollClient<T = HttpTransport> {
    remote: Remote<T>,
    session: SessionManager,
}

impl CrunchyrollClient<HttpTransport> {
    /// Create a client over HTTP and log in.
    pub fn connect(config: ClientConfig, username: &str, password: &str) -> Result<Self> {
        let config = config.normalized()?;
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport, username, password)
    }
}

impl<T: Transport> CrunchyrollClient<T> {
    /// Create a client over a custom transport and log in.
    ///
    /// Fails when the login fails; no client is returned in that case.
    pub fn with_transport(
        config: ClientConfig,
        transport: T,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let config = config.normalized()?;
        let device = DeviceIdentity::generate(&config);
        let session = SessionManager::new(device, config.locale.clone());

        let mut client = Self {
            remote: Remote::new(transport, config),
            session,
        };

        let response = client.login(username, password)?;
        if response.is_error() {
            warn!(username = %username, error = %response.describe(), "Login failed");
            return Err(ClientError::AuthFailed(response.describe()));
        }

        Ok(client)
    }

    pub fn config(&self) -> &ClientConfig {
        self.remote.config()
    }

    pub fn transport(&self) -> &T {
        self.remote.transport()
    }

    pub fn device(&self) -> &DeviceIdentity {
        self.session.device()
    }

    pub fn locale(&self) -> &str {
        self.session.locale()
    }

    /// Change the locale sent with subsequent requests.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.session.set_locale(locale);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    fn call(&mut self, method: &str, params: &[(&str, String)]) -> Result<ApiResponse> {
        self.session.execute(&self.remote, method, params)
    }

    /// Login with username and password.
    ///
    /// On success the returned auth credential is kept for later sessions.
    pub fn login(&mut self, username: &str, password: &str) -> Result<ApiResponse> {
        let params = [
            ("account", username.to_string()),
            ("password", password.to_string()),
        ];
        let response = self.call("login", &params)?;

        if !response.is_error() {
            let auth = response
                .data_str("auth")
                .ok_or_else(|| ClientError::AuthFailed("login response carried no auth".into()))?
                .to_string();
            self.session.set_auth(auth);
            info!(username = %username, "Login successful");
        }

        Ok(response)
    }

    /// Logout, dropping the auth credential and the session bound to it.
    pub fn logout(&mut self) -> Result<ApiResponse> {
        let mut params = Vec::new();
        if let Some(auth) = self.session.auth() {
            params.push(("auth", auth.to_string()));
        }
        let response = self.call("logout", &params)?;

        if !response.is_error() {
            self.session.clear_auth();
            self.session.invalidate();
            info!("Logged out");
        }

        Ok(response)
    }

    /// Details of a media, collection or series.
    pub fn info(&mut self, object_type: ObjectType, object_id: u64) -> Result<ApiResponse> {
        let params = [(object_type.id_key(), object_id.to_string())];
        self.call("info", &params)
    }

    /// Media belonging to a media, collection or series.
    pub fn list_media(
        &mut self,
        object_type: ObjectType,
        object_id: u64,
        options: &ListMediaOptions,
    ) -> Result<ApiResponse> {
        let mut params = vec![
            (object_type.id_key(), object_id.to_string()),
            ("sort", options.sort.as_str().to_string()),
            ("offset", options.offset.to_string()),
        ];
        if let Some(limit) = options.limit {
            params.push(("limit", limit.to_string()));
        }
        let locale = options
            .locale
            .clone()
            .unwrap_or_else(|| self.session.locale().to_string());
        params.push(("locale", locale));

        self.call("list_media", &params)
    }

    /// The user's queue, optionally projected onto `fields`.
    pub fn queue(&mut self, media_types: MediaType, fields: &[Field]) -> Result<ApiResponse> {
        let params = [
            ("media_types", media_types.as_str().to_string()),
            ("fields", Field::join(fields)),
        ];
        self.call("queue", &params)
    }

    pub fn add_to_queue(&mut self, _series_id: u64) -> Result<ApiResponse> {
        Err(ClientError::NotImplemented("add_to_queue"))
    }

    pub fn batch(&mut self) -> Result<ApiResponse> {
        Err(ClientError::NotImplemented("batch"))
    }

    pub fn categories(&mut self) -> Result<ApiResponse> {
        Err(ClientError::NotImplemented("categories"))
    }

    pub fn list_locales(&mut self) -> Result<ApiResponse> {
        Err(ClientError::NotImplemented("list_locales"))
    }

    pub fn list_series(&mut self) -> Result<ApiResponse> {
        Err(ClientError::NotImplemented("list_series"))
    }

    pub fn log(&mut self) -> Result<ApiResponse> {
        Err(ClientError::NotImplemented("log"))
    }

    pub fn recently_watched(&mut self) -> Result<ApiResponse> {
        Err(ClientError::NotImplemented("recently_watched"))
    }

    pub fn remove_from_queue(&mut self) -> Result<ApiResponse> {
        Err(ClientError::NotImplemented("remove_from_queue"))
    }
}
