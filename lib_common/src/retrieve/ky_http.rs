//! # HTTP Retrieval Utilities
//!
//! [`ApiClient`] wraps a middleware-enabled `reqwest` client rooted at one base
//! URL. Two call styles are offered:
//!
//! - [`ApiClient::request`] for JSON endpoints. A non-2xx answer is data, not an
//!   error: the caller gets an [`ApiResponse`] with the status and raw body and
//!   decides what it means (Yahoo answers 429 when throttling, for instance).
//! - [`ApiClient::get_text`] for scraped pages, where only a 2xx body is useful
//!   and anything else becomes [`FetchError::HttpStatus`].
//!
//! Retries stay off unless [`ApiClientOptions::max_retries`] is raised.

use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::FetchError;

/// User agent sent when none is configured. Some public pages refuse the
/// bare reqwest default.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";

/// Outcome of a JSON call that reached the server.
#[derive(Debug)]
pub struct ApiResponse<T> {
    /// HTTP status of the answer.
    pub status: StatusCode,
    /// Decoded body, present only for 2xx answers.
    pub data: Option<T>,
    /// Raw body of a non-2xx answer, when it could be read.
    pub error_body: Option<String>,
}

impl<T> ApiResponse<T> {
    /// True for 2xx answers.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Transport options for an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientOptions {
    /// Number of retries for transient failures. `0` disables the retry middleware.
    pub max_retries: u32,
    /// Request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ApiClientOptions {
    fn default() -> Self {
        Self {
            max_retries: 0,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client bound to a base URL, with optional retries.
pub struct ApiClient {
    http: ClientWithMiddleware,
    base_url: Url,
}

impl ApiClient {
    /// Builds a client for `base_url`, which must be absolute. Relative paths
    /// given to the call methods are joined onto it, so keep the trailing
    /// slash when the base is a directory.
    ///
    /// # Errors
    /// [`FetchError::InvalidUrl`] for a relative or malformed `base_url`,
    /// [`FetchError::Network`] if the TLS backend cannot be initialized.
    pub fn new(base_url: &str, options: ApiClientOptions) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)?;

        let mut transport = reqwest::Client::builder().user_agent(options.user_agent);
        if let Some(timeout) = options.timeout {
            transport = transport.timeout(timeout);
        }

        let mut stack = ClientBuilder::new(transport.build()?);
        if options.max_retries > 0 {
            let policy = ExponentialBackoff::builder().build_with_max_retries(options.max_retries);
            stack = stack.with(RetryTransientMiddleware::new_with_policy(policy));
        }

        Ok(Self {
            http: stack.build(),
            base_url,
        })
    }

    /// The base URL all request paths are joined to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` and attaches the query string.
    fn prepare(&self, method: Method, path: &str, query: Option<&[(&str, String)]>) -> Result<(Url, RequestBuilder), url::ParseError> {
        let url = self.base_url.join(path)?;
        let mut builder = self.http.request(method, url.clone());
        if let Some(pairs) = query {
            builder = builder.query(pairs);
        }
        Ok((url, builder))
    }

    /// Calls a JSON endpoint.
    ///
    /// `body`, when given, is serialized and sent as `application/json`.
    /// A 2xx answer is decoded into `T`; anything else is returned with
    /// `data == None` and the raw text in `error_body`.
    ///
    /// # Errors
    /// URL joining, transport failures and undecodable 2xx bodies.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        headers: Option<HeaderMap>,
        body: Option<B>,
    ) -> anyhow::Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let (url, mut builder) = self.prepare(method, path, query)?;
        if let Some(extra) = headers {
            builder = builder.headers(extra);
        }
        if let Some(payload) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(&payload)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "json call answered");

        if !status.is_success() {
            return Ok(ApiResponse {
                status,
                data: None,
                error_body: response.text().await.ok(),
            });
        }

        Ok(ApiResponse {
            status,
            data: Some(response.json::<T>().await?),
            error_body: None,
        })
    }

    /// GETs `path` and returns the body as text, for HTML pages.
    ///
    /// # Errors
    /// [`FetchError::HttpStatus`] for non-2xx answers, [`FetchError::Network`]
    /// for transport failures.
    pub async fn get_text(&self, path: &str, query: Option<&[(&str, String)]>) -> Result<String, FetchError> {
        let (url, builder) = self.prepare(Method::GET, path, query)?;
        let response = builder.send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.text().await?),
            status => {
                tracing::debug!(%url, status = status.as_u16(), "page request refused");
                Err(FetchError::HttpStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieve::test_support::serve_fixed;

    #[test]
    fn rejects_relative_base_url() {
        let result = ApiClient::new("not/a/url", ApiClientOptions::default());
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn get_text_returns_body() {
        let base = serve_fixed("200 OK", "text/html", "<html><body>ok</body></html>").await;
        let client = ApiClient::new(&base, ApiClientOptions::default()).unwrap();

        let body = client.get_text("page", None).await.unwrap();
        assert_eq!(body, "<html><body>ok</body></html>");
    }

    #[tokio::test]
    async fn get_text_maps_status_to_error() {
        let base = serve_fixed("503 Service Unavailable", "text/plain", "down").await;
        let client = ApiClient::new(&base, ApiClientOptions::default()).unwrap();

        match client.get_text("page", None).await {
            Err(FetchError::HttpStatus { status, url }) => {
                assert_eq!(status, 503);
                assert!(url.ends_with("/page"));
            }
            other => panic!("expected HttpStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn request_decodes_success() {
        let base = serve_fixed("200 OK", "application/json", "{\"count\":3}").await;
        let client = ApiClient::new(&base, ApiClientOptions::default()).unwrap();

        let res = client
            .request::<serde_json::Value, ()>(Method::GET, "v1/x", Some(&[("q", "AAPL".to_string())][..]), None, None)
            .await
            .unwrap();
        assert!(res.is_success());
        assert_eq!(res.data.unwrap()["count"], 3);
    }

    #[tokio::test]
    async fn request_reports_non_success_without_error() {
        let base = serve_fixed("404 Not Found", "application/json", "{\"error\":\"missing\"}").await;
        let client = ApiClient::new(&base, ApiClientOptions::default()).unwrap();

        let res = client
            .request::<serde_json::Value, ()>(Method::GET, "missing", None, None, None)
            .await
            .unwrap();
        assert!(!res.is_success());
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert!(res.data.is_none());
        assert_eq!(res.error_body.as_deref(), Some("{\"error\":\"missing\"}"));
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = ApiClient::new(&format!("http://127.0.0.1:{}/", port), ApiClientOptions::default()).unwrap();
        assert!(matches!(client.get_text("x", None).await, Err(FetchError::Network(_))));
    }
}
