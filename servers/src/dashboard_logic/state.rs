use std::sync::Arc;

use anyhow::{Context, Result};
use lib_common::analysis::{Analyzer, NewsSentimentScorer, VaderScorer};
use lib_common::markets::alternative::FearGreedPage;
use lib_common::markets::yahoo::{DEFAULT_NEWS_COUNT, YahooNews};
use lib_common::retrieve::ky_http::ApiClientOptions;

use super::config::Settings;

/// Read-only state shared by all handlers. Nothing in here changes after
/// startup; every request gets its own fear index reading and symbol list.
pub struct AppState {
    pub analyzer: Analyzer,
    pub default_symbols: Vec<String>,
    /// Most symbols a single request may ask for.
    pub max_symbols: usize,
}

impl AppState {
    pub fn new(analyzer: Analyzer, default_symbols: Vec<String>, max_symbols: usize) -> Arc<Self> {
        Arc::new(Self {
            analyzer,
            default_symbols,
            max_symbols,
        })
    }

    /// Wires the production clients described by `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Arc<Self>> {
        let options = client_options(settings);

        let index = FearGreedPage::new(&settings.fear_greed_url, &settings.fear_greed_selector, options)
            .context("configuring the Fear & Greed page client")?;
        let news = news_provider(settings)?;

        let scorer = NewsSentimentScorer::new(Arc::new(news), Arc::new(VaderScorer::new()))
            .with_max_headlines(settings.max_headlines);

        Ok(Self::new(
            Analyzer::new(Arc::new(index), scorer),
            settings.default_symbols.clone(),
            settings.max_symbols,
        ))
    }
}

fn client_options(settings: &Settings) -> ApiClientOptions {
    ApiClientOptions {
        max_retries: settings.http_max_retries,
        timeout: settings.http_timeout,
        ..Default::default()
    }
}

/// Yahoo client asking for at least as many items as get scored.
fn news_provider(settings: &Settings) -> Result<YahooNews> {
    let wanted = u32::try_from(settings.max_headlines).unwrap_or(u32::MAX);
    Ok(YahooNews::new(&settings.news_base_url, client_options(settings))
        .context("configuring the Yahoo news client")?
        .with_news_count(wanted.max(DEFAULT_NEWS_COUNT)))
}
