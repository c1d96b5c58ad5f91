use crate::config::types::{Config, CrawlConfig, DelayRange, FetchConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site(&config.site)?;
    validate_crawl(&config.crawl)?;
    validate_fetch(&config.fetch)?;
    validate_range("pacing.listing-fetch", &config.pacing.listing_fetch)?;
    validate_range("pacing.item-fetch", &config.pacing.item_fetch)?;
    validate_range("pacing.page-pause", &config.pacing.page_pause)?;
    validate_range("pacing.retry-backoff", &config.pacing.retry_backoff)?;
    validate_paths(config)?;
    Ok(())
}

fn validate_site(site: &SiteConfig) -> Result<(), ConfigError> {
    if !site.listing_url_template.contains("{page}") {
        return Err(ConfigError::Validation(format!(
            "listing_url_template must contain a {{page}} placeholder, got '{}'",
            site.listing_url_template
        )));
    }

    // The template must produce a parseable URL
    let sample = site.listing_url_template.replace("{page}", "1");
    Url::parse(&sample)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing_url_template: {}", e)))?;

    if site.item_marker.is_empty() {
        return Err(ConfigError::Validation(
            "item_marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_crawl(crawl: &CrawlConfig) -> Result<(), ConfigError> {
    if crawl.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start_page must be >= 1, got {}",
            crawl.start_page
        )));
    }

    if crawl.end_page < crawl.start_page {
        return Err(ConfigError::Validation(format!(
            "end_page must be >= start_page, got {}..{}",
            crawl.start_page, crawl.end_page
        )));
    }

    if crawl.empty_page_threshold < 1 {
        return Err(ConfigError::Validation(format!(
            "empty_page_threshold must be >= 1, got {}",
            crawl.empty_page_threshold
        )));
    }

    Ok(())
}

fn validate_fetch(fetch: &FetchConfig) -> Result<(), ConfigError> {
    if fetch.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if fetch.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            fetch.timeout_secs
        )));
    }

    Ok(())
}

fn validate_range(name: &str, range: &DelayRange) -> Result<(), ConfigError> {
    if range.min_secs < 0.0 || !range.min_secs.is_finite() || !range.max_secs.is_finite() {
        return Err(ConfigError::Validation(format!(
            "{} bounds must be finite and non-negative",
            name
        )));
    }

    if range.max_secs < range.min_secs {
        return Err(ConfigError::Validation(format!(
            "{} max-secs must be >= min-secs, got {}..{}",
            name, range.min_secs, range.max_secs
        )));
    }

    Ok(())
}

fn validate_paths(config: &Config) -> Result<(), ConfigError> {
    if config.output.links_path.is_empty() {
        return Err(ConfigError::Validation(
            "links_path cannot be empty".to_string(),
        ));
    }

    if config.output.details_path.is_empty() {
        return Err(ConfigError::Validation(
            "details_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{OutputConfig, PacingConfig};

    fn valid_config() -> Config {
        Config {
            site: SiteConfig {
                listing_url_template: "https://example.com/list/p{page}".to_string(),
                item_marker: "/ban-".to_string(),
            },
            crawl: CrawlConfig {
                start_page: 1,
                end_page: 10,
                empty_page_threshold: 3,
            },
            fetch: FetchConfig::default(),
            pacing: PacingConfig::default(),
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let mut config = valid_config();
        config.site.listing_url_template = "https://example.com/list".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_template_must_be_a_url() {
        let mut config = valid_config();
        config.site.listing_url_template = "not a url p{page}".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let mut config = valid_config();
        config.crawl.start_page = 5;
        config.crawl.end_page = 4;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_start_page_rejected() {
        let mut config = valid_config();
        config.crawl.start_page = 0;
        config.crawl.end_page = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_empty_threshold_rejected() {
        let mut config = valid_config();
        config.crawl.empty_page_threshold = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_inverted_delay_range_rejected() {
        let mut config = valid_config();
        config.pacing.page_pause = DelayRange::new(10.0, 2.0);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_degenerate_delay_range_allowed() {
        let mut config = valid_config();
        config.pacing.page_pause = DelayRange::new(0.0, 0.0);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_marker_rejected() {
        let mut config = valid_config();
        config.site.item_marker = String::new();
        assert!(validate(&config).is_err());
    }
}
