use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, parses and validates a TOML configuration file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so interrupted runs can be matched against the
/// exact configuration that produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
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

    const MINIMAL_CONFIG: &str = r#"
[site]
listing-url-template = "https://example.com/nha-dat-ban/p{page}"

[crawl]
start-page = 1
end-page = 50
"#;

    #[test]
    fn test_load_minimal_config_applies_defaults() {
        let file = create_temp_config(MINIMAL_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawl.start_page, 1);
        assert_eq!(config.crawl.end_page, 50);
        assert_eq!(config.crawl.empty_page_threshold, 3);
        assert_eq!(config.site.item_marker, "/ban-");
        assert_eq!(config.fetch.max_retries, 2);
        assert_eq!(config.pacing.page_pause.min_secs, 5.0);
        assert_eq!(config.pacing.page_pause.max_secs, 12.0);
        assert_eq!(config.output.links_path, "real_estate_links.csv");
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
[site]
listing-url-template = "https://example.com/p{page}"
item-marker = "/sale-"

[crawl]
start-page = 1621
end-page = 9000
empty-page-threshold = 5

[fetch]
user-agent = "TestAgent/1.0"
timeout-secs = 10
ready-timeout-secs = 5
ready-poll-secs = 1
max-retries = 4

[pacing]
listing-fetch = { min-secs = 0.1, max-secs = 0.2 }
item-fetch = { min-secs = 0.1, max-secs = 0.2 }
page-pause = { min-secs = 0.5, max-secs = 1.0 }
retry-backoff = { min-secs = 0.5, max-secs = 1.0 }

[output]
links-path = "links.csv"
details-path = "details.csv"
"#;
        let file = create_temp_config(content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.item_marker, "/sale-");
        assert_eq!(config.crawl.empty_page_threshold, 5);
        assert_eq!(config.fetch.max_retries, 4);
        assert_eq!(config.pacing.retry_backoff.max_secs, 1.0);
        assert_eq!(config.output.details_path, "details.csv");
    }

    #[test]
    fn test_listing_url_substitutes_page() {
        let file = create_temp_config(MINIMAL_CONFIG);
        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.listing_url(7),
            "https://example.com/nha-dat-ban/p7"
        );
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/harvest.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let content = r#"
[site]
listing-url-template = "https://example.com/p{page}"

[crawl]
start-page = 10
end-page = 5
"#;
        let file = create_temp_config(content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash_is_stable() {
        let file = create_temp_config("same content");
        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");
        assert_ne!(
            compute_config_hash(file1.path()).unwrap(),
            compute_config_hash(file2.path()).unwrap()
        );
    }
}
