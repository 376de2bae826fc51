//! Device identity presented to the API when starting sessions.

use crate::config::ClientConfig;
use rand::seq::SliceRandom;
use rand::Rng;

/// Character pool of the generated id. Digits appear twice.
const DEVICE_ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz0123456789";

/// Marker between the first and second groups of the id.
const DEVICE_ID_MARKER: &str = "-KODI-";

/// Identity of this client instance.
///
/// Generated once when the client is built and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    device_id: String,
    device_type: String,
    version: String,
    access_token: String,
}

impl DeviceIdentity {
    pub fn generate(config: &ClientConfig) -> Self {
        Self::generate_with(&mut rand::thread_rng(), config)
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, config: &ClientConfig) -> Self {
        Self {
            device_id: generate_device_id(rng),
            device_type: config.device_type.clone(),
            version: config.client_version.clone(),
            access_token: config.access_token.clone(),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn device_type(&self) -> &str {
        &self.device_type
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

/// Builds an id shaped `xxxxxxxx-KODI-xxxx-xxxx-xxxxxxxxxxxx`.
pub fn generate_device_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = String::with_capacity(36);
    id.push_str(&sample(rng, 8));
    id.push_str(DEVICE_ID_MARKER);
    id.push_str(&sample(rng, 4));
    id.push('-');
    id.push_str(&sample(rng, 4));
    id.push('-');
    id.push_str(&sample(rng, 12));
    id
}

/// Draws `len` characters without replacement from the pool.
fn sample<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    DEVICE_ID_CHARSET
        .choose_multiple(rng, len)
        .map(|&b| b as char)
        .collect()
}
