// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A Rust client library for the `openHAB` REST API.
//!
//! This library provides a thin async wrapper around the `openHAB` items
//! endpoint: it fetches item state as JSON and posts plain-text commands
//! to named items.
//!
//! # Supported Features
//!
//! - **Item queries**: Fetch a single item or the whole item collection,
//!   including `ga` and `synonyms` metadata
//! - **Commands**: Post opaque command payloads to named items
//! - **Authentication**: Basic-auth credentials or a bearer token,
//!   replaceable at runtime
//! - **TLS**: Selected by configuring port 443
//!
//! The wrapper deliberately stays out of the way: no retries, no
//! caching, no timeouts. Every call is a single round trip whose
//! failure is surfaced unchanged to the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! use openhab_client::{ApiConfig, ApiHandler};
//!
//! #[tokio::main]
//! async fn main() -> openhab_client::Result<()> {
//!     let config = ApiConfig::new("openhab.local").with_port(8080);
//!     let handler = ApiHandler::new(config)?;
//!
//!     // Fetch every item, with group and label fields included
//!     let items = handler.get_items().await?;
//!     println!("{items}");
//!
//!     // Command a single item
//!     handler.send_command("Kitchen_Light", "ON").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Token Authentication
//!
//! ```no_run
//! use openhab_client::{ApiConfig, ApiHandler};
//!
//! #[tokio::main]
//! async fn main() -> openhab_client::Result<()> {
//!     let handler = ApiHandler::new(ApiConfig::new("openhab.example.org").with_port(443))?;
//!     handler.set_auth_token("oh.myapp.secrettoken");
//!
//!     let item = handler.get_item("Kitchen_Light").await?;
//!     println!("state: {}", item["state"]);
//!     Ok(())
//! }
//! ```

mod config;
pub mod error;
mod handler;
mod options;

pub use config::ApiConfig;
pub use error::{Error, Result};
pub use handler::ApiHandler;
pub use options::RequestOptions;
