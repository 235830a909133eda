use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// The base URL is normalized (no trailing slash) so task URLs can be
/// built by plain concatenation.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;
    config.crawler.base_url = config.crawler.base_url.trim_end_matches('/').to_string();
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Used to detect whether the configuration changed between crawl runs.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"
[crawler]
seeds = [2803301701, 1699432410]
base-url = "https://weibo.cn/"
max-concurrent-fetches = 2
request-delay-ms = 250

[http]
user-agent = "Mozilla/5.0 (test)"
timeout-secs = 10

[output]
database-path = "./harvest.db"
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.seeds, vec![2803301701, 1699432410]);
        assert_eq!(config.crawler.base_url, "https://weibo.cn");
        assert_eq!(config.crawler.max_concurrent_fetches, 2);
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.output.database_path, "./harvest.db");
    }

    #[test]
    fn test_defaults_applied() {
        let file = create_temp_config(
            r#"
[crawler]
seeds = [2803301701]

[http]
user-agent = "Mozilla/5.0 (test)"

[output]
database-path = "./harvest.db"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.crawler.base_url, "https://weibo.cn");
        assert_eq!(config.crawler.max_concurrent_fetches, 4);
        assert_eq!(config.crawler.request_delay_ms, 500);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config(
            r#"
[crawler]
seeds = []

[http]
user-agent = "Mozilla/5.0 (test)"

[output]
database-path = "./harvest.db"
"#,
        );
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
