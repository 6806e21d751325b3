use clap::Parser;
use sip_catalog::Crawl;

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    ::log::info!("Starting catalog crawl for: {}", config.start_url);
    println!("Note: crawling requires a WebDriver server (e.g. ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default {}",
        config.webdriver_url
    );

    let start_time = std::time::Instant::now();
    let summary = match Crawl::with_config(config).run().await {
        Ok(summary) => summary,
        Err(e) => {
            ::log::error!("Crawl failed: {}", e);
            std::process::exit(1);
        }
    };

    let duration = start_time.elapsed();
    ::log::info!("Crawl complete in {:.2} seconds", duration.as_secs_f64());

    let run_date = &summary.timestamp[..10];
    println!(
        "\nSaved {} unique products to {}",
        summary.total_products, summary.output_file
    );
    println!("\nSuggested git commands:");
    println!("git add {}", summary.output_file);
    println!(
        "git commit -m \"Update: {} products scraped on {}\"",
        summary.total_products, run_date
    );
    println!(
        "git tag -a catalog-{} -m \"Scrape run: {} products\"",
        run_date, summary.total_products
    );
}
