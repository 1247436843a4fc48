use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Scraper settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScraperConfig {
    /// Request timeout in seconds, shared by page fetches and login flows
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Allow schema.org extraction on hosts missing from the supported-host list
    #[serde(default = "default_wild_mode")]
    pub wild_mode: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            wild_mode: default_wild_mode(),
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_wild_mode() -> bool {
    true
}

impl ScraperConfig {
    /// Load configuration from file and environment variables
    ///
    /// See [`load_config`].
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_SCRAPER__ prefix
/// 2. recipe-scraper.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_SCRAPER__TIMEOUT
pub fn load_config() -> Result<ScraperConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-scraper").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_SCRAPER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
