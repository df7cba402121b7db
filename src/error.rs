// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `openHAB` REST client.

use thiserror::Error;

/// Status code reported for responses whose body is not valid JSON.
const UNSUPPORTED_MEDIA_TYPE: u16 = 415;

/// The error type for `openHAB` REST API calls.
///
/// Every failure is surfaced to the immediate caller; the library never
/// retries on its own.
#[derive(Debug, Error)]
pub enum Error {
    /// The server responded with an unexpected status code.
    #[error("{operation} - failed for path: {path}")]
    UnexpectedStatus {
        /// Status code the server answered with.
        status_code: u16,
        /// The handler operation that issued the request.
        operation: &'static str,
        /// Request path including the query string.
        path: String,
    },

    /// The response body could not be parsed as JSON.
    #[error("get_item - JSON parse failed for path: {path} - {source}")]
    JsonParse {
        /// Request path including the query string.
        path: String,
        /// The underlying parse failure.
        source: serde_json::Error,
    },

    /// Transport-level failure (connection refused, DNS failure, TLS
    /// failure), surfaced unchanged.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// Returns the HTTP status code associated with this error.
    ///
    /// [`Error::JsonParse`] maps to 415 (unsupported media type);
    /// transport errors carry no status code.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status_code, .. } => Some(*status_code),
            Self::JsonParse { .. } => Some(UNSUPPORTED_MEDIA_TYPE),
            Self::Transport(_) => None,
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_display() {
        let err = Error::UnexpectedStatus {
            status_code: 404,
            operation: "get_item",
            path: "/rest/items/Missing?metadata=ga,synonyms".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "get_item - failed for path: /rest/items/Missing?metadata=ga,synonyms"
        );
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn json_parse_reports_415() {
        let source = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let err = Error::JsonParse {
            path: "/rest/items/X?metadata=ga,synonyms".to_string(),
            source,
        };
        assert_eq!(err.status_code(), Some(415));
        assert!(
            err.to_string()
                .starts_with("get_item - JSON parse failed for path: /rest/items/X")
        );
    }
}
