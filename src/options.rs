// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-request options derived from the handler configuration.

use reqwest::Method;
use reqwest::header::HeaderMap;

/// Options for a single request against the `openHAB` REST API.
///
/// A fresh set is derived for every call from the handler configuration
/// and the caller-supplied method and item name; nothing here is shared
/// between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub(crate) hostname: String,
    pub(crate) port: u16,
    pub(crate) path: String,
    pub(crate) method: Method,
    pub(crate) headers: HeaderMap,
    pub(crate) auth: Option<String>,
}

impl RequestOptions {
    /// Port that selects TLS transport.
    pub const TLS_PORT: u16 = 443;

    /// Returns the target hostname.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Returns the target port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the request path including the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the basic-auth credentials in `user:password` form, if
    /// any apply to this request.
    #[must_use]
    pub fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }

    /// Returns whether the request uses TLS.
    ///
    /// Transport is selected solely by the configured port: 443 means
    /// TLS, anything else plain HTTP. There is no scheme field.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.port == Self::TLS_PORT
    }

    /// Builds the full request URL.
    #[must_use]
    pub fn url(&self) -> String {
        let scheme = if self.is_secure() { "https" } else { "http" };
        format!("{scheme}://{}:{}{}", self.hostname, self.port, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(port: u16) -> RequestOptions {
        RequestOptions {
            hostname: "openhab.local".to_string(),
            port,
            path: "/rest/items/Lamp?metadata=ga,synonyms".to_string(),
            method: Method::GET,
            headers: HeaderMap::new(),
            auth: None,
        }
    }

    #[test]
    fn port_443_selects_tls() {
        let opts = options(443);
        assert!(opts.is_secure());
        assert_eq!(
            opts.url(),
            "https://openhab.local:443/rest/items/Lamp?metadata=ga,synonyms"
        );
    }

    #[test]
    fn other_ports_select_plain_http() {
        for port in [80, 8080, 8443] {
            let opts = options(port);
            assert!(!opts.is_secure());
            assert!(opts.url().starts_with("http://openhab.local:"));
        }
    }
}
