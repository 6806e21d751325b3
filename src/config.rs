use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for a catalog crawl.
///
/// Every field has a default, so a JSON config file only needs the
/// values it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Listing URL to crawl, paginated with a `?page=N` query parameter
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// User agent presented by the browser session
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Run the browser without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Browser window width in pixels
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    /// Browser window height in pixels
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Highest listing page index to fetch
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Consecutive empty pages after which the crawl stops
    #[serde(default = "default_empty_page_limit")]
    pub empty_page_limit: u32,

    /// Politeness delay between page fetches, in seconds
    #[serde(default = "default_page_delay_secs")]
    pub page_delay_secs: u64,

    /// Wait for dynamic content after navigation, in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Wait around age-gate probing and dismissal, in milliseconds
    #[serde(default = "default_gate_settle_ms")]
    pub gate_settle_ms: u64,

    /// Wait after lazy-load scrolling completes, in milliseconds
    #[serde(default = "default_post_scroll_ms")]
    pub post_scroll_ms: u64,

    /// Timeout for individual element probes, in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Scroll increment in pixels
    #[serde(default = "default_scroll_step_px")]
    pub scroll_step_px: u64,

    /// Pause between scroll increments, in milliseconds
    #[serde(default = "default_scroll_pause_ms")]
    pub scroll_pause_ms: u64,

    /// Upper bound on scroll increments per page
    #[serde(default = "default_max_scroll_steps")]
    pub max_scroll_steps: u32,

    /// Path of the JSON catalog written at the end of the run
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Directory product images are downloaded into
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: default_start_url(),
            webdriver_url: default_webdriver_url(),
            user_agent: default_user_agent(),
            headless: default_headless(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            max_pages: default_max_pages(),
            empty_page_limit: default_empty_page_limit(),
            page_delay_secs: default_page_delay_secs(),
            settle_ms: default_settle_ms(),
            gate_settle_ms: default_gate_settle_ms(),
            post_scroll_ms: default_post_scroll_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            scroll_step_px: default_scroll_step_px(),
            scroll_pause_ms: default_scroll_pause_ms(),
            max_scroll_steps: default_max_scroll_steps(),
            output_file: default_output_file(),
            images_dir: default_images_dir(),
        }
    }
}

impl CrawlerConfig {
    /// Configuration for a listing URL with default crawl behavior
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

fn default_start_url() -> String {
    "https://siptequila.com/collections/all-tequila-mezcal".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_viewport_width() -> u32 {
    1920
}

fn default_viewport_height() -> u32 {
    1080
}

fn default_max_pages() -> u32 {
    50
}

fn default_empty_page_limit() -> u32 {
    3
}

fn default_page_delay_secs() -> u64 {
    2
}

fn default_settle_ms() -> u64 {
    3000
}

fn default_gate_settle_ms() -> u64 {
    2000
}

fn default_post_scroll_ms() -> u64 {
    2000
}

fn default_probe_timeout_ms() -> u64 {
    1000
}

fn default_scroll_step_px() -> u64 {
    400
}

fn default_scroll_pause_ms() -> u64 {
    100
}

fn default_max_scroll_steps() -> u32 {
    120
}

fn default_output_file() -> String {
    "tequila_products.json".to_string()
}

fn default_images_dir() -> String {
    "tequila_images".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: CrawlerConfig =
            serde_json::from_str(r#"{"max_pages": 5, "headless": false}"#).unwrap();
        assert_eq!(config.max_pages, 5);
        assert!(!config.headless);
        assert_eq!(config.empty_page_limit, 3);
        assert_eq!(config.output_file, "tequila_products.json");
    }
}
