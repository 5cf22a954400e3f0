//! # Fear & Greed Live Data Test
//!
//! Fetches the live index and scores the default tickers against Yahoo news,
//! printing the same report the dashboard renders.

use std::sync::Arc;

use lib_common::analysis::{Analyzer, DEFAULT_SYMBOLS, NewsSentimentScorer, VaderScorer};
use lib_common::markets::IndexSource;
use lib_common::markets::alternative::FearGreedPage;
use lib_common::markets::yahoo::{YAHOO_BASE_URL, YahooNews};
use lib_common::retrieve::ky_http::ApiClientOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _guard = lib_common::loggers::setup_logging(std::path::Path::new("./logs"), "feargreed_test", "debug")?;

    let options = ApiClientOptions::default();
    let page = Arc::new(FearGreedPage::with_defaults(options.clone())?);
    let news = YahooNews::new(YAHOO_BASE_URL, options)?;

    println!("[*] Requesting the Fear & Greed page...");
    match page.fetch_index().await {
        Ok(value) => println!("[SUCCESS] Fear & Greed Index: {}", value),
        Err(e) => {
            eprintln!("\n[ERROR] Fear & Greed retrieval failed:");
            eprintln!(">>> {}", e);
        }
    }

    let scorer = NewsSentimentScorer::new(Arc::new(news), Arc::new(VaderScorer::new()));
    let analyzer = Analyzer::new(page, scorer);
    let symbols: Vec<String> = DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect();

    println!("[*] Analyzing {}...", symbols.join(", "));
    let fear_index = analyzer.fear_index().await;
    let report = analyzer.analyze(&fear_index, &symbols).await;

    println!("-----------------------------------------------");
    println!("{}", serde_json::to_string_pretty(&report)?);
    println!("-----------------------------------------------");

    if !report.warnings.is_empty() {
        eprintln!("[WARN] {} fallback(s) used", report.warnings.len());
        std::process::exit(1);
    }
    Ok(())
}
