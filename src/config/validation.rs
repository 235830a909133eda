use crate::config::Config;
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Validates a parsed configuration
///
/// Checks everything the type system cannot: non-empty seed list, sane
/// limits, and a base URL the crawl can actually build task URLs against.
pub fn validate(config: &Config) -> ConfigResult<()> {
    if config.crawler.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed user id is required".to_string(),
        ));
    }

    if config.crawler.max_concurrent_fetches == 0 {
        return Err(ConfigError::Validation(
            "max-concurrent-fetches must be greater than 0".to_string(),
        ));
    }

    let base = Url::parse(&config.crawler.base_url)
        .map_err(|_| ConfigError::InvalidUrl(config.crawler.base_url.clone()))?;
    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(config.crawler.base_url.clone()));
    }

    if config.http.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    if config.http.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be greater than 0".to_string(),
        ));
    }

    if config.output.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database-path must not be empty".to_string(),
        ));
    }

    Ok(())
}
