//! Session lifecycle: lazy session start, invalidation and the retry policy.

use crate::device::DeviceIdentity;
use crate::error::{ClientError, Result};
use crate::transport::{Remote, Transport};
use crate::types::ApiResponse;
use tracing::{debug, info, warn};

/// Owns the device identity, the auth credential and the session token.
///
/// The session token is created on demand by [`SessionManager::get_session`]
/// and thrown away whenever a call reports an API error.
#[derive(Debug, Clone)]
pub struct SessionManager {
    device: DeviceIdentity,
    locale: String,
    auth: Option<String>,
    session_id: Option<String>,
}

impl SessionManager {
    pub fn new(device: DeviceIdentity, locale: impl Into<String>) -> Self {
        Self {
            device,
            locale: locale.into(),
            auth: None,
            session_id: None,
        }
    }

    pub fn device(&self) -> &DeviceIdentity {
        &self.device
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }

    pub fn set_auth(&mut self, auth: impl Into<String>) {
        self.auth = Some(auth.into());
    }

    pub fn clear_auth(&mut self) {
        self.auth = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Current session token, if one has been started.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Returns the current session token, starting a session first if needed.
    pub fn get_session<T: Transport>(&mut self, remote: &Remote<T>) -> Result<&str> {
        if self.session_id.is_none() {
            let session_id = self.start_session(remote)?;
            self.session_id = Some(session_id);
        }

        self.session_id
            .as_deref()
            .ok_or_else(|| ClientError::Session("no session available".into()))
    }

    /// Forces the next [`get_session`](Self::get_session) to start a new session.
    pub fn invalidate(&mut self) {
        debug!("Invalidating session");
        self.session_id = None;
    }

    /// Drops the session and the auth credential; the caller must log in again.
    pub fn reset(&mut self) {
        warn!("Resetting session state, re-authentication required");
        self.session_id = None;
        self.auth = None;
    }

    fn start_session<T: Transport>(&self, remote: &Remote<T>) -> Result<String> {
        let mut form = vec![
            field("device_id", self.device.device_id()),
            field("device_type", self.device.device_type()),
            field("access_token", self.device.access_token()),
            field("version", self.device.version()),
            field("locale", &self.locale),
        ];
        if let Some(auth) = &self.auth {
            form.push(field("auth", auth));
        }

        let response = remote.call("start_session", &form)?;

        if response.is_error() {
            warn!(error = %response.describe(), "start_session rejected");
            return Err(ClientError::Session(response.describe()));
        }

        let session_id = response
            .data_str("session_id")
            .ok_or_else(|| ClientError::Session("response carried no session_id".into()))?
            .to_string();

        info!(
            device_id = %self.device.device_id(),
            authenticated = self.auth.is_some(),
            "Session started"
        );

        Ok(session_id)
    }

    /// Calls `method` under the session retry policy.
    ///
    /// An error envelope triggers one session restart and one retry. If the
    /// retry fails as well, all session state is reset and the failed
    /// envelope is returned as `Ok`. Transport errors are never retried.
    pub fn execute<T: Transport>(
        &mut self,
        remote: &Remote<T>,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse> {
        let first = self.attempt(remote, method, params)?;
        if !first.is_error() {
            return Ok(first);
        }

        warn!(
            method = %method,
            error = %first.describe(),
            "API error, restarting session and retrying"
        );
        self.invalidate();
        self.get_session(remote)?;

        let retried = self.attempt(remote, method, params)?;
        if retried.is_error() {
            warn!(
                method = %method,
                error = %retried.describe(),
                "Retry failed"
            );
            self.reset();
        }

        Ok(retried)
    }

    /// One request with version, locale and session attached.
    fn attempt<T: Transport>(
        &mut self,
        remote: &Remote<T>,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<ApiResponse> {
        let session_id = self.get_session(remote)?.to_string();

        let mut form: Vec<(String, String)> = params
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        form.push(field("version", self.device.version()));
        // A per-call locale takes precedence over the session locale
        if !params.iter().any(|(key, _)| *key == "locale") {
            form.push(field("locale", &self.locale));
        }
        form.push(("session_id".to_string(), session_id));

        remote.call(method, &form)
    }
}

fn field(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}
