pub mod fields;

#[cfg(test)]
mod tests;

use crate::records::RawProduct;
use fields::{IMAGE_ATTRS, absolutize, is_placeholder, price_from_text};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Sentinel price used when no candidate selector matched
pub const PRICE_NOT_FOUND: &str = "Price not found";

/// Ordered candidate selectors for product tiles on the listing page
const ITEM_SELECTORS: &[&str] = &[
    ".product-item",
    ".grid__item",
    ".collection__product",
    "article[data-product-id]",
    "[data-product-handle]",
    ".product-grid-item",
    ".product-card",
];

/// Ordered candidates for the product name (and usually the detail link)
const NAME_SELECTORS: &[&str] = &[
    ".product-item__title",
    ".product__title",
    ".product-card__title",
    ".product-card__name",
    "h3 a",
    "h2 a",
    "h3",
    "h2",
    "a[href*=\"/products/\"]",
];

/// Ordered candidates for the price element
const PRICE_SELECTORS: &[&str] = &[
    ".price",
    ".product-item__price",
    ".product__price",
    ".product-card__price",
    ".money",
    "[data-price]",
    "span[class*=\"price\"]",
];

/// Ordered candidates for the product image
const IMAGE_SELECTORS: &[&str] = &[
    "img[data-src]",
    "img[src*=\"cdn.shopify\"]",
    "img.product__image",
    "img.product-card__image",
    "img",
    ".responsive-image__image",
];

/// Anchor pointing at a product detail page
const PRODUCT_ANCHOR: &str = "a[href*=\"/products/\"]";

/// Extracts product tiles from rendered listing-page HTML.
///
/// Selector chains are tried in order and the first match wins, so the
/// extractor keeps working across minor theme variations. It operates on
/// a page-source string and touches no browser state.
pub struct Extractor {
    origin: Url,
    item_selectors: Vec<Selector>,
    name_selectors: Vec<Selector>,
    price_selectors: Vec<Selector>,
    image_selectors: Vec<Selector>,
    product_anchor: Selector,
    descendant_anchor: Selector,
    price_pattern: Regex,
}

impl Extractor {
    /// Build an extractor resolving relative URLs against the origin of
    /// `base_url`.
    pub fn new(base_url: &Url) -> Self {
        let mut origin = base_url.clone();
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);

        Self {
            origin,
            item_selectors: compile(ITEM_SELECTORS),
            name_selectors: compile(NAME_SELECTORS),
            price_selectors: compile(PRICE_SELECTORS),
            image_selectors: compile(IMAGE_SELECTORS),
            product_anchor: Selector::parse(PRODUCT_ANCHOR).unwrap(),
            descendant_anchor: Selector::parse("a").unwrap(),
            price_pattern: fields::price_pattern(),
        }
    }

    /// Extract all product tiles from a rendered listing page.
    ///
    /// An empty result is not an error; it usually means the listing is
    /// exhausted.
    pub fn extract_products(&self, html: &str) -> Vec<RawProduct> {
        let doc = Html::parse_document(html);
        let items = self.select_items(&doc);
        let products: Vec<RawProduct> = items
            .iter()
            .filter_map(|item| self.extract_item(item))
            .collect();
        ::log::debug!(
            "Extracted {} products from {} candidate tiles",
            products.len(),
            items.len()
        );
        products
    }

    /// First selector in the chain that yields any tiles wins; a page
    /// where none match falls back to grouping product anchors.
    fn select_items<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        for (selector, raw) in self.item_selectors.iter().zip(ITEM_SELECTORS) {
            let found: Vec<ElementRef<'a>> = doc.select(selector).collect();
            if !found.is_empty() {
                ::log::debug!("Found {} items with selector: {}", found.len(), raw);
                return found;
            }
        }

        let grouped = self.items_from_anchors(doc);
        ::log::debug!("Found {} items by grouping product links", grouped.len());
        grouped
    }

    /// Last-resort tile discovery: one container per distinct product
    /// anchor, in document order.
    fn items_from_anchors<'a>(&self, doc: &'a Html) -> Vec<ElementRef<'a>> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for anchor in doc.select(&self.product_anchor) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if href.contains("/collections/") || !seen.insert(href.to_string()) {
                continue;
            }
            items.push(container_of(anchor));
        }
        items
    }

    /// A record needs both a name and a detail URL; anything else is
    /// dropped.
    fn extract_item(&self, item: &ElementRef) -> Option<RawProduct> {
        let Some((name, url)) = self.name_and_url(item) else {
            ::log::debug!("Dropping tile without name or detail link");
            return None;
        };
        Some(RawProduct {
            name,
            url,
            price: self.price(item),
            image_url: self.image_url(item),
        })
    }

    fn name_and_url(&self, item: &ElementRef) -> Option<(String, String)> {
        for selector in &self.name_selectors {
            let Some(elem) = item.select(selector).next() else {
                continue;
            };
            let name = element_text(&elem);
            if name.is_empty() {
                continue;
            }

            let href = if elem.value().name() == "a" {
                elem.value().attr("href")
            } else {
                elem.select(&self.descendant_anchor)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .or_else(|| {
                        item.select(&self.product_anchor)
                            .next()
                            .and_then(|a| a.value().attr("href"))
                    })
            };

            let url = href.and_then(|h| absolutize(&self.origin, h))?;
            return Some((name, url));
        }
        None
    }

    fn price(&self, item: &ElementRef) -> String {
        for selector in &self.price_selectors {
            let Some(elem) = item.select(selector).next() else {
                continue;
            };
            let text = element_text(&elem);
            if text.is_empty() {
                continue;
            }
            return price_from_text(&self.price_pattern, &text);
        }
        PRICE_NOT_FOUND.to_string()
    }

    fn image_url(&self, item: &ElementRef) -> Option<String> {
        for selector in &self.image_selectors {
            let Some(elem) = item.select(selector).next() else {
                continue;
            };
            let Some(candidate) = IMAGE_ATTRS.iter().find_map(|attr| elem.value().attr(attr))
            else {
                continue;
            };
            // srcset entries carry width descriptors after the URL
            let candidate = candidate.split_whitespace().next().unwrap_or(candidate);
            if candidate.is_empty() || is_placeholder(candidate) {
                continue;
            }
            return absolutize(&self.origin, candidate);
        }
        None
    }
}

fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
}

/// Whitespace-normalized text content of an element
fn element_text(elem: &ElementRef) -> String {
    elem.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Nearest ancestor that looks like a product tile; the anchor's parent
/// element as a last resort.
fn container_of(anchor: ElementRef) -> ElementRef {
    for node in anchor.ancestors() {
        let Some(elem) = ElementRef::wrap(node) else {
            continue;
        };
        let tag = elem.value().name();
        if tag == "body" || tag == "html" {
            break;
        }
        let classes = elem.value().attr("class").unwrap_or("");
        if classes.split_whitespace().any(|c| c == "grid__item") || classes.contains("product") {
            return elem;
        }
    }

    anchor.parent().and_then(ElementRef::wrap).unwrap_or(anchor)
}
