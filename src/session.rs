use crate::config::CrawlerConfig;
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;
use tokio::time::sleep;

/// Confirmation phrases accepted on an age-gate control, compared
/// case-insensitively against the element text.
const AGE_GATE_PHRASES: &[&str] = &["yes", "enter", "i am 21", "i'm 21", "i am over 21"];

/// CSS selectors tried for an age-gate control after the text scan
const AGE_GATE_SELECTORS: &[&str] = &[
    ".age-gate__button",
    ".age-verification button",
    "[data-age-gate-submit]",
    "button[type=\"submit\"]",
];

/// Alternative WebDriver endpoints probed when the configured one is down
const FALLBACK_WEBDRIVER_URLS: &[&str] = &[
    "http://localhost:9515",
    "http://localhost:4444",
    "http://127.0.0.1:4444",
];

/// Hides the most common automation tell from page scripts
const MASK_WEBDRIVER_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined });";

/// A WebDriver-backed browser session configured to present as an
/// ordinary desktop browser.
pub struct Session {
    client: Client,
    gate_settle: Duration,
    probe_timeout: Duration,
}

impl Session {
    /// Connect to the configured WebDriver endpoint, falling back through
    /// common local endpoints before giving up.
    pub async fn connect(config: &CrawlerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = match Self::try_connect(&config.webdriver_url, config).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", config.webdriver_url);
                client
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url,
                    e
                );
                match Self::connect_fallbacks(config).await {
                    Some(client) => client,
                    None => {
                        return Err(
                            "no WebDriver server reachable; start ChromeDriver or set WEBDRIVER_URL"
                                .into(),
                        );
                    }
                }
            }
        };

        client
            .set_window_size(config.viewport_width, config.viewport_height)
            .await?;

        Ok(Self {
            client,
            gate_settle: Duration::from_millis(config.gate_settle_ms),
            probe_timeout: Duration::from_millis(config.probe_timeout_ms),
        })
    }

    async fn try_connect(
        webdriver_url: &str,
        config: &CrawlerConfig,
    ) -> Result<Client, NewSessionError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(chrome_capabilities(config));
        builder.connect(webdriver_url).await
    }

    async fn connect_fallbacks(config: &CrawlerConfig) -> Option<Client> {
        for &url in FALLBACK_WEBDRIVER_URLS {
            if url == config.webdriver_url {
                continue;
            }
            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = Self::try_connect(url, config).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Some(client);
            }
        }
        None
    }

    /// Navigate to a page and re-apply the automation masking script.
    ///
    /// Navigation resolves on the DOM load event; dynamic content settles
    /// during the later waits.
    pub async fn open(&self, url: &str) -> Result<(), CmdError> {
        self.client.goto(url).await?;
        if let Err(e) = self.client.execute(MASK_WEBDRIVER_SCRIPT, vec![]).await {
            ::log::debug!("Automation masking script failed: {}", e);
        }
        Ok(())
    }

    /// Try to click through an age-verification overlay.
    ///
    /// Labeled controls are scanned first, then the known gate selectors.
    /// Absence of a gate is the common case and not an error.
    pub async fn dismiss_age_gate(&self) -> bool {
        sleep(self.gate_settle).await;

        if let Ok(candidates) = self.client.find_all(Locator::Css("button, a")).await {
            for candidate in candidates {
                let text = match candidate.text().await {
                    Ok(text) => text.trim().to_lowercase(),
                    Err(_) => continue,
                };
                if AGE_GATE_PHRASES.iter().any(|p| text == *p) {
                    ::log::info!("Dismissing age gate via control labeled {:?}", text);
                    if candidate.click().await.is_ok() {
                        sleep(self.gate_settle).await;
                        return true;
                    }
                }
            }
        }

        for &selector in AGE_GATE_SELECTORS {
            let found = self
                .client
                .wait()
                .at_most(self.probe_timeout)
                .for_element(Locator::Css(selector))
                .await;
            if let Ok(button) = found {
                ::log::info!("Dismissing age gate via selector: {}", selector);
                if button.click().await.is_ok() {
                    sleep(self.gate_settle).await;
                    return true;
                }
            }
        }

        false
    }

    /// Incrementally scroll to the bottom so lazy-loaded tiles populate.
    ///
    /// The step count is bounded so a listing with infinite scroll cannot
    /// pin the crawl on one page.
    pub async fn scroll_to_bottom(
        &self,
        step_px: u64,
        pause: Duration,
        max_steps: u32,
    ) -> Result<(), CmdError> {
        let mut scrolled = 0u64;
        for _ in 0..max_steps {
            let height = self
                .client
                .execute(
                    "window.scrollBy(0, arguments[0]); return document.body.scrollHeight;",
                    vec![json!(step_px)],
                )
                .await?;
            scrolled += step_px;
            if scrolled >= height.as_u64().unwrap_or(0) {
                break;
            }
            sleep(pause).await;
        }
        Ok(())
    }

    /// Source of the current page after rendering
    pub async fn source(&self) -> Result<String, CmdError> {
        self.client.source().await
    }

    /// Close the browser session; failures are logged, not propagated.
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }
    }
}

/// Chrome options presenting the session as a normal desktop browser
fn chrome_capabilities(config: &CrawlerConfig) -> serde_json::Map<String, serde_json::Value> {
    let mut args = vec![
        "--no-sandbox".to_string(),
        "--disable-setuid-sandbox".to_string(),
        "--disable-blink-features=AutomationControlled".to_string(),
        format!("--user-agent={}", config.user_agent),
        format!(
            "--window-size={},{}",
            config.viewport_width, config.viewport_height
        ),
    ];
    if config.headless {
        args.push("--headless=new".to_string());
    }

    let mut caps = serde_json::Map::new();
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}
