// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection configuration for the `openHAB` REST API.

use serde::{Deserialize, Deserializer};

/// Configuration for an `openHAB` server connection.
///
/// Holds the static connection parameters used to derive the per-request
/// options. The item path is normalized on every write path so it always
/// starts and ends with `/`.
///
/// The struct is deserializable, so an embedding application can read it
/// straight from its own configuration file.
///
/// # Examples
///
/// ```
/// use openhab_client::ApiConfig;
///
/// // Plain HTTP on the default port
/// let config = ApiConfig::new("openhab.local");
///
/// // TLS (selected by port 443) with basic-auth credentials
/// let config = ApiConfig::new("openhab.example.org")
///     .with_port(443)
///     .with_userpass("habuser:secret");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    host: String,
    #[serde(default = "default_path", deserialize_with = "normalized_path")]
    path: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    userpass: Option<String>,
}

impl ApiConfig {
    /// Default item path on the server.
    pub const DEFAULT_PATH: &'static str = "/rest/items/";
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;

    /// Creates a configuration for the specified host with the default
    /// item path and port.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: Self::DEFAULT_PATH.to_string(),
            port: Self::DEFAULT_PORT,
            userpass: None,
        }
    }

    /// Sets the item path, normalizing it to start and end with `/`.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = normalize(&path.into());
        self
    }

    /// Sets a custom port. Port 443 selects TLS transport.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets basic-auth credentials in `user:password` form.
    ///
    /// When credentials are configured they take precedence over any
    /// bearer token set on the handler.
    #[must_use]
    pub fn with_userpass(mut self, userpass: impl Into<String>) -> Self {
        self.userpass = Some(userpass.into());
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the normalized item path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the basic-auth credentials if configured.
    #[must_use]
    pub fn userpass(&self) -> Option<&str> {
        self.userpass.as_deref()
    }
}

fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 2);
    if !path.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(path);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

fn normalized_path<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|path| normalize(&path))
}

fn default_path() -> String {
    ApiConfig::DEFAULT_PATH.to_string()
}

fn default_port() -> u16 {
    ApiConfig::DEFAULT_PORT
}
