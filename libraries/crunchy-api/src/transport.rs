//! HTTP transport used to reach the API.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::ApiResponse;
use reqwest::blocking::Client;
use tracing::{debug, warn};

/// Posts a form-encoded body and returns the raw response bytes.
///
/// Non-success statuses and connection problems are reported as errors;
/// interpreting the body is left to the caller.
pub trait Transport {
    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<Vec<u8>>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(format!("crunchy-api/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<Vec<u8>> {
        debug!(url = %url, fields = form.len(), "POST");

        let response = self.http.post(url).form(form).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ClientError::ServerUnreachable(e.to_string())
            } else {
                ClientError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            Ok(response.bytes()?.to_vec())
        } else {
            let error_text = response.text().unwrap_or_default();
            warn!(status = %status, url = %url, "Request rejected");
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<Vec<u8>> {
        (**self).post_form(url, form)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post_form(&self, url: &str, form: &[(String, String)]) -> Result<Vec<u8>> {
        (**self).post_form(url, form)
    }
}

/// A transport bound to the endpoint layout of one configuration.
///
/// Decodes every successful HTTP exchange into an [`ApiResponse`].
#[derive(Debug)]
pub struct Remote<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> Remote<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs one round trip to `method`.
    pub fn call(&self, method: &str, form: &[(String, String)]) -> Result<ApiResponse> {
        let url = self.config.endpoint(method);
        // Values may hold credentials; only the names are logged
        let params: Vec<&str> = form.iter().map(|(k, _)| k.as_str()).collect();
        debug!(method = %method, url = %url, params = ?params, "Calling API");

        let body = self.transport.post_form(&url, form)?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!(method = %method, error = %e, "Unparseable response body");
            ClientError::ParseError(format!("Failed to parse {} response: {}", method, e))
        })
    }
}
