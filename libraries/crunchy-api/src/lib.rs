//! Crunchyroll API Client
//!
//! Blocking HTTP client for the Crunchyroll JSON API.
//!
//! # Features
//!
//! - **Authentication**: Login with username/password, logout
//! - **Sessions**: Lazy session start, one automatic restart-and-retry on API errors
//! - **Catalogue**: Info lookup and media listing for media, collections and series
//! - **Queue**: Queue listing with field projection
//!
//! # Example
//!
//! ```ignore
//! use crunchy_api::{ClientConfig, CrunchyrollClient, Field, MediaType};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads crunchyroll.toml and CRUNCHYROLL_* variables
//!     let config = ClientConfig::load()?;
//!
//!     // Connecting logs in; a failed login fails here
//!     let mut client = CrunchyrollClient::connect(config, "user", "password")?;
//!
//!     let queue = client.queue(MediaType::AnimeDrama, &[Field::MediaMediaId])?;
//!     if queue.is_error() {
//!         eprintln!("queue failed: {:?}", queue.message);
//!     }
//!
//!     client.logout()?;
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod device;
mod error;
mod session;
mod transport;
mod types;

// Re-export main types
pub use client::CrunchyrollClient;
pub use config::{ClientConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use device::{generate_device_id, DeviceIdentity};
pub use error::{ClientError, Result};
pub use session::SessionManager;
pub use transport::{HttpTransport, Remote, Transport};
pub use types::{ApiResponse, Field, ListMediaOptions, MediaType, ObjectType, SortMode};
