use serde::Deserialize;
use skytrip_shared::Masked;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub search_api: SearchApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    pub seating: Option<SeatingConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// Connection details for the flight search provider.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchApiConfig {
    pub base_url: String,
    pub host: String,
    #[serde(default)]
    pub api_key: Masked<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_market")]
    pub market: String,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_currency() -> String { "INR".to_string() }
fn default_market() -> String { "en-GB".to_string() }
fn default_country_code() -> String { "IN".to_string() }
fn default_locale() -> String { "en-US".to_string() }
fn default_timeout_seconds() -> u64 { 30 }

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before an airport lookup fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 { 300 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: default_debounce_ms() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PersistenceConfig {
    #[serde(default = "default_root_key")]
    pub root_key: String,
    /// Top-level session fields written to the blob store. Empty persists nothing.
    #[serde(default)]
    pub allow_list: Vec<String>,
    /// Redis blob store; the in-memory store is used when unset.
    pub redis_url: Option<String>,
}

fn default_root_key() -> String { "root".to_string() }

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            root_key: default_root_key(),
            allow_list: Vec::new(),
            redis_url: None,
        }
    }
}

/// Cabin layout override; the standard 29-row cabin is used when absent.
#[derive(Debug, Deserialize, Clone)]
pub struct SeatingConfig {
    pub rows: u16,
    pub columns: String,
    #[serde(default)]
    pub occupied: Vec<String>,
    #[serde(default)]
    pub unavailable: Vec<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Developer-local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYTRIP__SEARCH_API__API_KEY=...`
            .add_source(config::Environment::with_prefix("SKYTRIP").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Parse a single TOML document, without files or environment.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
