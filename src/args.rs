use clap::Parser;
use sip_catalog::CrawlerConfig;

#[derive(Parser, Debug)]
#[command(name = "sip-catalog")]
#[command(about = "Scrapes a paginated storefront listing into a JSON product catalog")]
#[command(version)]
pub struct Args {
    /// Listing URL to crawl (defaults to the tequila collection)
    pub url: Option<String>,

    /// JSON config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<String>,

    /// Highest page index to fetch
    #[arg(short, long)]
    pub max_pages: Option<u32>,

    /// Delay between page fetches in seconds
    #[arg(short, long)]
    pub delay: Option<u64>,

    /// Output JSON file for the catalog
    #[arg(short, long)]
    pub output: Option<String>,

    /// Directory for downloaded product images
    #[arg(long)]
    pub images_dir: Option<String>,

    /// WebDriver endpoint to drive the browser through
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Show the browser window while crawling
    #[arg(long)]
    pub headed: bool,
}

impl Args {
    /// Resolve the crawler configuration: config file first (when given),
    /// then command-line overrides on top.
    pub fn into_config(self) -> Result<CrawlerConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => CrawlerConfig::from_file(path)?,
            None => CrawlerConfig::default(),
        };

        if let Some(url) = self.url {
            config.start_url = url;
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(delay) = self.delay {
            config.page_delay_secs = delay;
        }
        if let Some(output) = self.output {
            config.output_file = output;
        }
        if let Some(images_dir) = self.images_dir {
            config.images_dir = images_dir;
        }
        if let Some(webdriver_url) = self.webdriver_url {
            config.webdriver_url = webdriver_url;
        }
        if self.headed {
            config.headless = false;
        }

        Ok(config)
    }
}
