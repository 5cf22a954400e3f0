//! # Yahoo Finance News Integration
//!
//! Recent headlines per ticker come from the public Yahoo Finance search
//! endpoint, which returns quotes and news in one JSON document.
//!
//! ## Contained Modules:
//!
//! - **`apicallyahoo`**: Low-level HTTP call and raw response models.
//! - **`news`**: [`news::YahooNews`], the [`crate::markets::MarketDataProvider`]
//!   implementation that normalizes raw items into [`crate::markets::NewsItem`]s.

/// Low-level client for the Yahoo Finance search endpoint.
pub mod apicallyahoo;
/// News provider built on the search endpoint.
pub mod news;

pub use news::{YahooNews, DEFAULT_NEWS_COUNT, YAHOO_BASE_URL};
