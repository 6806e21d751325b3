use crate::catalog::Catalog;
use crate::config::CrawlerConfig;
use crate::extract::Extractor;
use crate::images::ImageStore;
use crate::pagination::{PageCursor, StopReason};
use crate::persist;
use crate::records::{ProductRecord, RawProduct, RunSummary};
use crate::session::Session;
use fantoccini::error::CmdError;
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// Crawl the configured listing end to end and persist the catalog.
///
/// Page-level failures count as empty pages and never abort the run; the
/// loop ends on the page cap or the empty-page streak, whichever comes
/// first.
pub async fn run(config: &CrawlerConfig) -> Result<RunSummary, Box<dyn Error>> {
    let base_url = Url::parse(&config.start_url)?;
    let extractor = Extractor::new(&base_url);
    let images = ImageStore::new(&config.images_dir, &config.user_agent)?;
    let session = Session::connect(config).await?;

    let mut catalog = Catalog::new();
    let mut cursor = PageCursor::new(config.max_pages, config.empty_page_limit);

    let stop = loop {
        let page_url = cursor.page_url(&config.start_url);
        ::log::info!("Scraping page {}: {}", cursor.current(), page_url);

        let extracted =
            match fetch_page(&session, &extractor, config, &page_url, cursor.current() == 1).await
            {
                Ok(products) => products,
                Err(e) => {
                    ::log::warn!("Error scraping page {}: {}", page_url, e);
                    Vec::new()
                }
            };
        cursor.record(extracted.len());

        let found = extracted.len();
        let mut new_count = 0;
        for raw in extracted {
            if catalog.contains(&raw.url) {
                continue;
            }
            let record = enrich(&images, raw).await;
            ::log::info!("Scraped: {} - {}", record.name, record.price);
            catalog.insert(record);
            new_count += 1;
        }
        if found > 0 {
            ::log::info!(
                "Found {} products on page {} ({} new, {} total unique)",
                found,
                cursor.current(),
                new_count,
                catalog.len()
            );
        }

        if let Some(reason) = cursor.advance() {
            break reason;
        }
        sleep(Duration::from_secs(config.page_delay_secs)).await;
    };

    match stop {
        StopReason::EmptyStreak => ::log::info!(
            "No products on {} consecutive pages, stopping",
            config.empty_page_limit
        ),
        StopReason::MaxPages => {
            ::log::info!("Reached the page cap of {}, stopping", config.max_pages)
        }
    }

    session.close().await;
    persist::save_catalog(&config.output_file, catalog.records())
}

/// Render one listing page and extract its product tiles.
///
/// The age gate can only appear on the first page of a session.
async fn fetch_page(
    session: &Session,
    extractor: &Extractor,
    config: &CrawlerConfig,
    url: &str,
    first_page: bool,
) -> Result<Vec<RawProduct>, CmdError> {
    session.open(url).await?;
    if first_page && session.dismiss_age_gate().await {
        ::log::info!("Age gate dismissed");
    }

    sleep(Duration::from_millis(config.settle_ms)).await;
    session
        .scroll_to_bottom(
            config.scroll_step_px,
            Duration::from_millis(config.scroll_pause_ms),
            config.max_scroll_steps,
        )
        .await?;
    sleep(Duration::from_millis(config.post_scroll_ms)).await;

    let html = session.source().await?;
    Ok(extractor.extract_products(&html))
}

/// Attach the downloaded image filename, if any, to a raw product
async fn enrich(images: &ImageStore, raw: RawProduct) -> ProductRecord {
    let image_filename = match &raw.image_url {
        Some(image_url) => images.fetch(image_url, &raw.name).await,
        None => None,
    };
    raw.into_record(image_filename)
}
