use clap::Parser;
use lib_common::analysis::{DEFAULT_SYMBOLS, MAX_HEADLINES};
use lib_common::markets::alternative::{FEAR_GREED_SELECTOR, FEAR_GREED_URL};
use lib_common::markets::yahoo::YAHOO_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "server_dashboard.conf";

/// Most symbols analyzed by one request when nothing else is configured.
pub const DEFAULT_MAX_SYMBOLS: usize = 10;

#[derive(Parser, Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[clap(about = "Bull/Bear Stock Analyzer dashboard", version)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[clap(long, env = "DASHBOARD_PORT", help = "Port to listen on.")]
    pub port: Option<u16>,

    #[clap(long, env = "DASHBOARD_BIND", help = "Address to bind to.")]
    pub bind_address: Option<String>,

    #[clap(long, env = "DASHBOARD_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[clap(long, env = "DASHBOARD_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[clap(long, env = "DASHBOARD_LOG_LEVEL", help = "Logging level (trace, debug, info, warn, error, fatal).")]
    pub log_level: Option<String>,

    #[clap(long, env = "DASHBOARD_FEAR_GREED_URL", help = "Page carrying the Fear & Greed Index.")]
    pub fear_greed_url: Option<String>,

    #[clap(long, env = "DASHBOARD_FEAR_GREED_SELECTOR", help = "CSS selector of the element holding the index value.")]
    pub fear_greed_selector: Option<String>,

    #[clap(long, env = "DASHBOARD_NEWS_BASE_URL", help = "Base URL of the Yahoo Finance query host.")]
    pub news_base_url: Option<String>,

    #[clap(long, env = "DASHBOARD_MAX_HEADLINES", help = "Headlines scored per symbol.")]
    pub max_headlines: Option<usize>,

    #[clap(long, env = "DASHBOARD_HTTP_MAX_RETRIES", help = "Retries for transient HTTP failures (0 disables).")]
    pub http_max_retries: Option<u32>,

    #[clap(long, env = "DASHBOARD_HTTP_TIMEOUT_SECS", help = "Outbound request timeout in seconds. Unset keeps the transport default.")]
    pub http_timeout_secs: Option<u64>,

    #[clap(long, env = "DASHBOARD_DEFAULT_SYMBOLS", value_delimiter = ',', help = "Comma-separated tickers offered on the dashboard.")]
    pub default_symbols: Option<Vec<String>>,

    #[clap(long, env = "DASHBOARD_MAX_SYMBOLS", help = "Most symbols analyzed by one request.")]
    pub max_symbols: Option<usize>,
}

/// Fully resolved settings after merging defaults, file and CLI/env.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub port: u16,
    pub bind_address: String,
    pub log_dir: PathBuf,
    pub log_level: String,
    pub fear_greed_url: String,
    pub fear_greed_selector: String,
    pub news_base_url: String,
    pub max_headlines: usize,
    pub http_max_retries: u32,
    pub http_timeout: Option<Duration>,
    pub default_symbols: Vec<String>,
    pub max_symbols: usize,
}

impl Config {
    // Merge two Config structs, where 'other' overrides 'self' for Some values
    fn merge(self, other: Config) -> Config {
        Config {
            port: other.port.or(self.port),
            bind_address: other.bind_address.or(self.bind_address),
            config_path: other.config_path.or(self.config_path),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
            fear_greed_url: other.fear_greed_url.or(self.fear_greed_url),
            fear_greed_selector: other.fear_greed_selector.or(self.fear_greed_selector),
            news_base_url: other.news_base_url.or(self.news_base_url),
            max_headlines: other.max_headlines.or(self.max_headlines),
            http_max_retries: other.http_max_retries.or(self.http_max_retries),
            http_timeout_secs: other.http_timeout_secs.or(self.http_timeout_secs),
            default_symbols: other.default_symbols.or(self.default_symbols),
            max_symbols: other.max_symbols.or(self.max_symbols),
        }
    }

    fn defaults() -> Config {
        Config {
            port: Some(8501),
            bind_address: Some("0.0.0.0".to_string()),
            log_dir: Some(PathBuf::from("./logs")),
            log_level: Some("info".to_string()),
            fear_greed_url: Some(FEAR_GREED_URL.to_string()),
            fear_greed_selector: Some(FEAR_GREED_SELECTOR.to_string()),
            news_base_url: Some(YAHOO_BASE_URL.to_string()),
            max_headlines: Some(MAX_HEADLINES),
            http_max_retries: Some(0),
            default_symbols: Some(DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()),
            max_symbols: Some(DEFAULT_MAX_SYMBOLS),
            ..Default::default()
        }
    }

    fn into_settings(self) -> Settings {
        let defaults = Config::defaults();
        let symbols: Vec<String> = self
            .default_symbols
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        let symbol_count = if symbols.is_empty() { DEFAULT_SYMBOLS.len() } else { symbols.len() };

        Settings {
            port: self.port.or(defaults.port).unwrap_or(8501),
            bind_address: self.bind_address.or(defaults.bind_address).unwrap_or_default(),
            log_dir: self.log_dir.or(defaults.log_dir).unwrap_or_default(),
            log_level: self.log_level.or(defaults.log_level).unwrap_or_default(),
            fear_greed_url: self.fear_greed_url.or(defaults.fear_greed_url).unwrap_or_default(),
            fear_greed_selector: self.fear_greed_selector.or(defaults.fear_greed_selector).unwrap_or_default(),
            news_base_url: self.news_base_url.or(defaults.news_base_url).unwrap_or_default(),
            max_headlines: self.max_headlines.unwrap_or(MAX_HEADLINES).max(1),
            http_max_retries: self.http_max_retries.unwrap_or(0),
            http_timeout: self.http_timeout_secs.map(Duration::from_secs),
            default_symbols: if symbols.is_empty() {
                DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
            } else {
                symbols
            },
            // Never below the preset list, so the untouched picker always fits.
            max_symbols: self
                .max_symbols
                .unwrap_or(DEFAULT_MAX_SYMBOLS)
                .max(symbol_count)
                .max(1),
        }
    }
}

fn read_config_file(path: &Path) -> Option<Config> {
    if !path.exists() {
        tracing::info!("Config file not found at {}. Using defaults and environment/CLI variables.", path.display());
        return None;
    }
    match fs::read_to_string(path) {
        Ok(config_str) => match serde_json::from_str::<Config>(&config_str) {
            Ok(file_config) => Some(file_config),
            Err(e) => {
                tracing::warn!("Failed to parse config file {}: {}. Falling back to other sources.", path.display(), e);
                None
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}. Falling back to other sources.", path.display(), e);
            None
        }
    }
}

/// Resolves settings from defaults, then the JSON file, then CLI/env (`cli`).
pub fn resolve(cli: Config) -> Settings {
    let config_file_path = cli
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let mut current_config = Config::defaults();
    if let Some(file_config) = read_config_file(&config_file_path) {
        current_config = current_config.merge(file_config);
    }
    current_config.merge(cli).into_settings()
}

pub fn load_config() -> Settings {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    resolve(Config::parse())
}
