//! # Fetch Errors
//!
//! Every outbound call in the analyzer (the fear & greed page, the news feed)
//! reports failures through [`FetchError`]. Callers decide whether to surface the
//! error or collapse it into a fallback value; the error itself never carries a
//! default.

use thiserror::Error;

/// Failure while retrieving or interpreting data from an external source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured base URL or a joined path is not a valid absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// The expected HTML element is not present in the page.
    #[error("no element matches selector `{selector}`")]
    MissingElement {
        /// The CSS selector that was searched for.
        selector: String,
    },

    /// The payload was received but could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// A blank ticker symbol was requested.
    #[error("empty ticker symbol")]
    EmptySymbol,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for FetchError {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(inner) => inner.into(),
            reqwest_middleware::Error::Middleware(inner) => FetchError::Network(inner.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

impl From<anyhow::Error> for FetchError {
    fn from(e: anyhow::Error) -> Self {
        let e = match e.downcast::<reqwest_middleware::Error>() {
            Ok(inner) => return inner.into(),
            Err(e) => e,
        };
        let e = match e.downcast::<reqwest::Error>() {
            Ok(inner) => return inner.into(),
            Err(e) => e,
        };
        match e.downcast::<url::ParseError>() {
            Ok(inner) => FetchError::InvalidUrl(inner),
            Err(e) => FetchError::Parse(e.to_string()),
        }
    }
}
