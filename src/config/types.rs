use serde::Deserialize;

/// Main configuration structure for a harvest run
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Target-site addressing
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Listing page URL template; `{page}` is replaced by the 1-based page number
    #[serde(rename = "listing-url-template", default = "default_listing_template")]
    pub listing_url_template: String,

    /// Substring an href must contain to count as an item link
    #[serde(rename = "item-marker", default = "default_item_marker")]
    pub item_marker: String,
}

/// Discovery loop bounds and termination
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// First listing page to visit (1-based, inclusive)
    #[serde(rename = "start-page")]
    pub start_page: u32,

    /// Last listing page to visit (inclusive)
    #[serde(rename = "end-page")]
    pub end_page: u32,

    /// Consecutive link-less pages that end the discovery run
    #[serde(rename = "empty-page-threshold", default = "default_empty_threshold")]
    pub empty_page_threshold: u32,
}

/// Fetch and retry behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long to wait for a page's readiness marker before proceeding anyway
    #[serde(rename = "ready-timeout-secs", default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: u64,

    /// Interval between readiness re-checks
    #[serde(rename = "ready-poll-secs", default = "default_ready_poll_secs")]
    pub ready_poll_secs: u64,

    /// Full-cycle retries after the initial attempt
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,
}

/// A uniform delay range in seconds
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DelayRange {
    #[serde(rename = "min-secs")]
    pub min_secs: f64,
    #[serde(rename = "max-secs")]
    pub max_secs: f64,
}

impl DelayRange {
    pub const fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }
}

/// Randomized delay bounds per operation class
#[derive(Debug, Clone, Deserialize)]
pub struct PacingConfig {
    /// Pause after rendering a listing page, before reading links
    #[serde(rename = "listing-fetch", default = "default_listing_fetch")]
    pub listing_fetch: DelayRange,

    /// Pause after rendering an item page, before extraction
    #[serde(rename = "item-fetch", default = "default_item_fetch")]
    pub item_fetch: DelayRange,

    /// Pause between listing pages
    #[serde(rename = "page-pause", default = "default_page_pause")]
    pub page_pause: DelayRange,

    /// Backoff before re-running a failed fetch cycle
    #[serde(rename = "retry-backoff", default = "default_retry_backoff")]
    pub retry_backoff: DelayRange,
}

/// Input/output file paths
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Link CSV: written by stage one, read by stage two
    #[serde(rename = "links-path", default = "default_links_path")]
    pub links_path: String,

    /// Property record CSV written by stage two
    #[serde(rename = "details-path", default = "default_details_path")]
    pub details_path: String,
}

fn default_listing_template() -> String {
    "https://batdongsan.com.vn/nha-dat-ban/p{page}".to_string()
}

fn default_item_marker() -> String {
    "/ban-".to_string()
}

fn default_empty_threshold() -> u32 {
    3
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_ready_timeout_secs() -> u64 {
    20
}

fn default_ready_poll_secs() -> u64 {
    2
}

fn default_max_retries() -> u32 {
    2
}

fn default_listing_fetch() -> DelayRange {
    DelayRange::new(3.0, 6.0)
}

fn default_item_fetch() -> DelayRange {
    DelayRange::new(3.0, 5.0)
}

fn default_page_pause() -> DelayRange {
    DelayRange::new(5.0, 12.0)
}

fn default_retry_backoff() -> DelayRange {
    DelayRange::new(5.0, 10.0)
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            ready_timeout_secs: default_ready_timeout_secs(),
            ready_poll_secs: default_ready_poll_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            listing_fetch: default_listing_fetch(),
            item_fetch: default_item_fetch(),
            page_pause: default_page_pause(),
            retry_backoff: default_retry_backoff(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            links_path: default_links_path(),
            details_path: default_details_path(),
        }
    }
}

fn default_links_path() -> String {
    "real_estate_links.csv".to_string()
}

fn default_details_path() -> String {
    "real_estate_details.csv".to_string()
}

impl Config {
    /// Derives the listing page URL for a 1-based page index
    pub fn listing_url(&self, page: u32) -> String {
        self.site
            .listing_url_template
            .replace("{page}", &page.to_string())
    }
}
