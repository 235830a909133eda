use serde::Deserialize;

/// Main configuration structure for Weibo-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Numeric user ids the crawl starts from
    pub seeds: Vec<u64>,

    /// Site root every task URL is built against
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Maximum number of fetches in flight
    #[serde(rename = "max-concurrent-fetches", default = "default_concurrency")]
    pub max_concurrent_fetches: u32,

    /// Pause between dispatching consecutive fetches (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_delay")]
    pub request_delay_ms: u64,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

fn default_base_url() -> String {
    "https://weibo.cn".to_string()
}

fn default_concurrency() -> u32 {
    4
}

fn default_delay() -> u64 {
    500
}

fn default_timeout() -> u64 {
    30
}
