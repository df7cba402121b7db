// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request handler for the `openHAB` REST API.

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::options::RequestOptions;

/// Query string requested with every item fetch.
const METADATA_QUERY: &str = "?metadata=ga,synonyms";
/// Field selection added when fetching the whole item collection.
const COLLECTION_FIELDS_QUERY: &str = "&fields=groupNames,groupType,name,label,metadata,type";

/// Handler for requests towards the `openHAB` REST API.
///
/// One handler serves one `openHAB` server. The connection parameters are
/// fixed at construction; the bearer token may be replaced at any time
/// via [`ApiHandler::set_auth_token`]. The handler keeps no other state
/// between calls, so concurrent requests on a shared instance are fine.
///
/// Requests carry no client-side timeout. Callers that need a deadline
/// wrap the call in their own, e.g. `tokio::time::timeout`.
///
/// # Examples
///
/// ```no_run
/// use openhab_client::{ApiConfig, ApiHandler};
///
/// #[tokio::main]
/// async fn main() -> openhab_client::Result<()> {
///     let handler = ApiHandler::new(ApiConfig::new("openhab.local"))?;
///     handler.set_auth_token("oh.myapp.secrettoken");
///
///     let item = handler.get_item("Kitchen_Light").await?;
///     println!("state: {}", item["state"]);
///
///     handler.send_command("Kitchen_Light", "ON").await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ApiHandler {
    config: ApiConfig,
    client: Client,
    auth_token: RwLock<String>,
}

impl ApiHandler {
    /// Creates a handler for the given server configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            config,
            client,
            auth_token: RwLock::new(String::new()),
        })
    }

    /// Replaces the stored bearer token.
    ///
    /// The token is attached to subsequent requests as
    /// `Authorization: Bearer <token>`, unless the configuration carries
    /// basic-auth credentials, which always win. The token is not
    /// validated.
    pub fn set_auth_token(&self, token: impl Into<String>) {
        *self.auth_token.write() = token.into();
    }

    /// Derives the request options for one call.
    ///
    /// `GET` requests ask for `ga` and `synonyms` metadata; a fetch of
    /// the whole collection (empty `item_name`) additionally selects the
    /// item fields of interest. `POST` requests carry no query string
    /// and declare a plain-text body of `body_length` bytes.
    #[must_use]
    pub fn build_options(
        &self,
        method: Method,
        item_name: &str,
        body_length: usize,
    ) -> RequestOptions {
        let query = if method == Method::GET {
            if item_name.is_empty() {
                format!("{METADATA_QUERY}{COLLECTION_FIELDS_QUERY}")
            } else {
                METADATA_QUERY.to_string()
            }
        } else {
            String::new()
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let auth = self.config.userpass().map(str::to_string);
        if auth.is_none() {
            let token = self.auth_token.read();
            if !token.is_empty()
                && let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}"))
            {
                headers.insert(AUTHORIZATION, value);
            }
        }

        if method == Method::POST {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
            headers.insert(CONTENT_LENGTH, HeaderValue::from(body_length));
        }

        RequestOptions {
            hostname: self.config.host().to_string(),
            port: self.config.port(),
            path: format!("{}{item_name}{query}", self.config.path()),
            method,
            headers,
            auth,
        }
    }

    /// Fetches the state of a single item, parsed from the JSON
    /// response body.
    ///
    /// An empty `item_name` fetches the whole item collection, see
    /// [`ApiHandler::get_items`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedStatus`] on any status other than
    /// 200, [`Error::JsonParse`] if the body is not valid JSON, and
    /// [`Error::Transport`] unchanged on network failure.
    pub async fn get_item(&self, item_name: &str) -> Result<Value> {
        let options = self.build_options(Method::GET, item_name, 0);
        tracing::debug!(url = %options.url(), "fetching item state");

        let response = self.request(&options).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                status_code: status.as_u16(),
                operation: "get_item",
                path: options.path,
            });
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "received item payload");

        serde_json::from_str(&body).map_err(|source| Error::JsonParse {
            path: options.path,
            source,
        })
    }

    /// Fetches the whole item collection.
    ///
    /// Alias for [`ApiHandler::get_item`] with an empty item name.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiHandler::get_item`].
    pub async fn get_items(&self) -> Result<Value> {
        self.get_item("").await
    }

    /// Posts a command to the named item.
    ///
    /// The payload is written verbatim as the plain-text request body.
    /// The response body, if any, is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedStatus`] on any status other than 200
    /// or 201, and [`Error::Transport`] unchanged on network failure.
    pub async fn send_command(&self, item_name: &str, payload: &str) -> Result<()> {
        let options = self.build_options(Method::POST, item_name, payload.len());
        tracing::debug!(url = %options.url(), payload = %payload, "sending command");

        let response = self
            .request(&options)
            .body(payload.to_string())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(Error::UnexpectedStatus {
                status_code: status.as_u16(),
                operation: "send_command",
                path: options.path,
            });
        }

        Ok(())
    }

    fn request(&self, options: &RequestOptions) -> RequestBuilder {
        let mut request = self
            .client
            .request(options.method().clone(), options.url())
            .headers(options.headers().clone());

        if let Some(userpass) = options.auth() {
            let (user, password) = match userpass.split_once(':') {
                Some((user, password)) => (user, Some(password)),
                None => (userpass, None),
            };
            request = request.basic_auth(user, password);
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(config: ApiConfig) -> ApiHandler {
        ApiHandler::new(config).unwrap()
    }

    #[test]
    fn get_options_request_item_metadata() {
        let handler = handler(ApiConfig::new("openhab.local"));
        let options = handler.build_options(Method::GET, "Kitchen_Light", 0);

        assert_eq!(
            options.path(),
            "/rest/items/Kitchen_Light?metadata=ga,synonyms"
        );
        assert!(!options.path().contains("fields="));
        assert_eq!(options.headers()[ACCEPT], "application/json");
    }

    #[test]
    fn collection_options_select_item_fields() {
        let handler = handler(ApiConfig::new("openhab.local"));
        let options = handler.build_options(Method::GET, "", 0);

        assert_eq!(
            options.path(),
            "/rest/items/?metadata=ga,synonyms&fields=groupNames,groupType,name,label,metadata,type"
        );
    }

    #[test]
    fn post_options_declare_plain_text_body() {
        let handler = handler(ApiConfig::new("openhab.local"));
        let options = handler.build_options(Method::POST, "Kitchen_Light", 2);

        assert_eq!(options.path(), "/rest/items/Kitchen_Light");
        assert!(!options.path().contains('?'));
        assert_eq!(options.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(options.headers()[CONTENT_LENGTH], "2");
    }

    #[test]
    fn options_are_rebuilt_identically_per_call() {
        let handler = handler(ApiConfig::new("openhab.local"));

        let first = handler.build_options(Method::GET, "", 0);
        let second = handler.build_options(Method::GET, "", 0);
        assert_eq!(first, second);
    }

    #[test]
    fn bearer_token_is_attached_after_set() {
        let handler = handler(ApiConfig::new("openhab.local"));
        handler.set_auth_token("oh.rule.token");

        let options = handler.build_options(Method::GET, "Lamp", 0);
        assert_eq!(options.headers()[AUTHORIZATION], "Bearer oh.rule.token");
        assert!(options.auth().is_none());
    }

    #[test]
    fn set_auth_token_replaces_previous_token() {
        let handler = handler(ApiConfig::new("openhab.local"));
        handler.set_auth_token("first");
        handler.set_auth_token("second");

        let options = handler.build_options(Method::GET, "Lamp", 0);
        assert_eq!(options.headers()[AUTHORIZATION], "Bearer second");
    }

    #[test]
    fn userpass_wins_over_bearer_token() {
        let handler = handler(ApiConfig::new("openhab.local").with_userpass("habuser:secret"));
        handler.set_auth_token("oh.rule.token");

        let options = handler.build_options(Method::GET, "Lamp", 0);
        assert_eq!(options.auth(), Some("habuser:secret"));
        assert!(!options.headers().contains_key(AUTHORIZATION));
    }

    #[test]
    fn no_credentials_means_no_auth() {
        let handler = handler(ApiConfig::new("openhab.local"));

        let options = handler.build_options(Method::GET, "Lamp", 0);
        assert!(options.auth().is_none());
        assert!(!options.headers().contains_key(AUTHORIZATION));
    }

    #[test]
    fn empty_token_is_not_attached() {
        let handler = handler(ApiConfig::new("openhab.local"));
        handler.set_auth_token("");

        let options = handler.build_options(Method::GET, "Lamp", 0);
        assert!(!options.headers().contains_key(AUTHORIZATION));
    }

    #[test]
    fn custom_path_and_port_flow_into_options() {
        let handler = handler(
            ApiConfig::new("openhab.local")
                .with_path("custom/items")
                .with_port(8443),
        );

        let options = handler.build_options(Method::GET, "Lamp", 0);
        assert_eq!(options.hostname(), "openhab.local");
        assert_eq!(options.port(), 8443);
        assert_eq!(options.path(), "/custom/items/Lamp?metadata=ga,synonyms");
    }
}
