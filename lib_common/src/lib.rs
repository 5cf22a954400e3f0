//! # lib_common
//!
//! Shared library for the Bull/Bear stock analyzer. Every top-level module is
//! gated behind a cargo feature of the same name so binaries only compile what
//! they use.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Error types shared by the retrieval and market clients.
#[cfg(feature = "retrieve")]
pub mod error;
/// Generic HTTP clients.
#[cfg(feature = "retrieve")]
pub mod retrieve;
/// Clients for the fear & greed page and the market news provider.
#[cfg(feature = "markets")]
pub mod markets;
/// Sentiment scoring, recommendation and the analysis pipeline.
#[cfg(feature = "analysis")]
pub mod analysis;
/// Console and file logging setup.
#[cfg(feature = "loggers")]
pub mod loggers;

#[cfg(feature = "retrieve")]
pub use error::FetchError;
