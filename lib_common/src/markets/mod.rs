//! # Financial Market Data Module
//!
//! This module groups together all logic and client implementations related to
//! the external market data the analyzer depends on. Its purpose is to hide
//! the details of each provider behind two small traits defined in
//! [`sources`], so the analysis pipeline never talks to a concrete service.
//!
//! ## Contained Modules:
//!
//! - **`sources`**: The [`sources::IndexSource`] and
//!   [`sources::MarketDataProvider`] traits, the [`sources::NewsItem`] model and
//!   the fallback wrapper for the fear & greed value.
//!
//! - **`alternative`**: Scrapes the Alternative.me Fear & Greed Index page.
//!
//! - **`yahoo`**: Retrieves recent news headlines for a ticker from Yahoo
//!   Finance.

/// Provider-agnostic traits and models.
pub mod sources;
/// Client for the Alternative.me Fear & Greed Index page.
pub mod alternative;
/// Client for Yahoo Finance news.
pub mod yahoo;

pub use sources::{fetch_index_or_default, IndexReading, IndexSource, MarketDataProvider, NewsItem, DEFAULT_FEAR_INDEX};
