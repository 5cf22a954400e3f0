//! # Data Retrieval Module
//!
//! This module provides a centralized location for generic data retrieval
//! clients, primarily focused on HTTP-based interactions.
//!
//! ## Contained Modules:
//!
//! - **`ky_http`**: A generic HTTP `ApiClient` built on `reqwest` and
//!   `reqwest-middleware`. It serves as the foundation for the market clients
//!   (fear & greed page, Yahoo Finance news). Retries are opt-in through
//!   `reqwest-retry` and disabled by default.

/// Generic HTTP API client with optional retry middleware.
pub mod ky_http;

#[cfg(test)]
pub(crate) mod test_support;
