//! The file server's auth token
//!
//! `download.auth_token` is read from TOML or `SHUTTER_DOWNLOAD_AUTH_TOKEN`
//! and then travels through the config until the downloader copies it into
//! the `X-Auth-Token` header. Along the way it is held as a [`SecretString`]:
//! `{:?}` of the config never shows it and the buffer is wiped on drop.
//!
//! ```rust
//! use secrecy::ExposeSecret;
//! use shutter::config::secret_string;
//!
//! let token = secret_string("file-server-token".to_string());
//! assert_eq!(token.expose_secret(), "file-server-token");
//! assert!(!format!("{token:?}").contains("file-server-token"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Token text, zeroed when dropped
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Blank tokens count as empty; config validation rejects them
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Auth token as stored in [`crate::config::DownloadConfig`]
pub type SecretString = Secret<SecretValue>;

/// Wrap a plain token, e.g. one taken from an environment override
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}
