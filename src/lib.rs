// Re-export modules
pub mod catalog;
pub mod config;
pub mod crawl;
pub mod extract;
pub mod images;
pub mod pagination;
pub mod persist;
pub mod records;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::CrawlerConfig;
pub use records::{ProductRecord, RunSummary};

use std::error::Error;

/// Builder for a catalog crawl over a paginated product listing.
pub struct Crawl {
    config: CrawlerConfig,
}

impl Crawl {
    /// Crawl the given listing URL with default settings
    pub fn new(start_url: &str) -> Self {
        Self {
            config: CrawlerConfig::new(start_url),
        }
    }

    /// Use a fully specified configuration
    pub fn with_config(config: CrawlerConfig) -> Self {
        Self { config }
    }

    /// Set the highest listing page index to fetch
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the politeness delay between page fetches
    pub fn with_page_delay(mut self, seconds: u64) -> Self {
        self.config.page_delay_secs = seconds;
        self
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Set the catalog output path
    pub fn with_output_file(mut self, path: &str) -> Self {
        self.config.output_file = path.to_string();
        self
    }

    /// Set the image download directory
    pub fn with_images_dir(mut self, path: &str) -> Self {
        self.config.images_dir = path.to_string();
        self
    }

    /// Run the browser with or without a visible window
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// Run the crawl to completion and write the catalog.
    pub async fn run(mut self) -> Result<RunSummary, Box<dyn Error>> {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.config.webdriver_url = webdriver_url;
            }
        }

        crawl::run(&self.config).await
    }
}
