//! # Alternative.me Fear & Greed Integration
//!
//! Alternative.me publishes a 0–100 Fear & Greed Index on a public web page.
//! There is no stable JSON contract for the page, so the value is scraped from
//! the rendered HTML.
//!
//! ## Contained Modules:
//!
//! - **`fearandgreed`**: The page client, implementing
//!   [`crate::markets::IndexSource`], and the pure HTML parsing routine.

/// Page client and HTML parsing for the Fear & Greed Index.
pub mod fearandgreed;

pub use fearandgreed::{parse_index, FearGreedPage, FEAR_GREED_SELECTOR, FEAR_GREED_URL};
