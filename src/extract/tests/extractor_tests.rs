use crate::extract::{Extractor, PRICE_NOT_FOUND};
use url::Url;

fn extractor() -> Extractor {
    let base = Url::parse("https://siptequila.com/collections/all-tequila-mezcal").unwrap();
    Extractor::new(&base)
}

fn page(body: &str) -> String {
    format!("<html><head></head><body>{}</body></html>", body)
}

#[test]
fn test_first_matching_item_selector_wins() {
    // Selectors 1-5 of the chain match nothing here; both the 6th
    // (.product-grid-item) and the 7th (.product-card) have matches. The
    // 6th must win and the .product-card tile must be ignored.
    let html = page(
        r#"
        <div class="product-grid-item"><h3><a href="/products/alpha">Alpha</a></h3></div>
        <div class="product-grid-item"><h3><a href="/products/beta">Beta</a></h3></div>
        <div class="product-card"><h3><a href="/products/gamma">Gamma</a></h3></div>
        "#,
    );

    let products = extractor().extract_products(&html);
    let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
}

#[test]
fn test_anchor_grouping_fallback() {
    // No tile selector matches; tiles are recovered by grouping product
    // anchors under their parent containers. The duplicate anchor and the
    // collections link must not produce extra tiles.
    let html = page(
        r#"
        <div class="listing">
          <div class="tile">
            <a href="/products/anejo-reserva">Anejo Reserva</a>
            <span class="price">$59.00</span>
          </div>
          <div class="tile">
            <a href="/products/anejo-reserva">Anejo Reserva</a>
          </div>
          <a href="/collections/all">View all</a>
        </div>
        "#,
    );

    let products = extractor().extract_products(&html);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Anejo Reserva");
    assert_eq!(products[0].url, "https://siptequila.com/products/anejo-reserva");
    assert_eq!(products[0].price, "$59.00");
}

#[test]
fn test_tiles_without_name_or_link_are_dropped() {
    let html = page(
        r#"
        <div class="product-card"><img src="https://cdn.shopify.com/a.jpg"></div>
        <div class="product-card"><h3>Nameless Link</h3></div>
        <div class="product-card"><h3><a href="/products/kept">Kept</a></h3></div>
        "#,
    );

    let products = extractor().extract_products(&html);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Kept");
}

#[test]
fn test_name_from_title_class_with_item_level_anchor() {
    // The title element is not an anchor; the detail URL must come from
    // the item-level product anchor.
    let html = page(
        r#"
        <div class="product-item">
          <a href="/products/espadin"><img src="https://cdn.shopify.com/espadin.jpg"></a>
          <div class="product-item__title">Espadin Joven</div>
          <span class="product-item__price">Sale price$49.99</span>
        </div>
        "#,
    );

    let products = extractor().extract_products(&html);
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Espadin Joven");
    assert_eq!(products[0].url, "https://siptequila.com/products/espadin");
    assert_eq!(products[0].price, "$49.99");
}

#[test]
fn test_price_currency_pattern_and_fallbacks() {
    let html = page(
        r#"
        <div class="product-card">
          <h3><a href="/products/a">A</a></h3>
          <span class="price">Sale price$1,299.00</span>
        </div>
        <div class="product-card">
          <h3><a href="/products/b">B</a></h3>
          <span class="price">Contact us</span>
        </div>
        <div class="product-card">
          <h3><a href="/products/c">C</a></h3>
        </div>
        "#,
    );

    let products = extractor().extract_products(&html);
    assert_eq!(products[0].price, "$1,299.00");
    assert_eq!(products[1].price, "Contact us");
    assert_eq!(products[2].price, PRICE_NOT_FOUND);
}

#[test]
fn test_image_placeholder_skipped_for_later_candidate() {
    // The first image matches img[data-src] but is a placeholder; the
    // chain must continue to the classed image and normalize its
    // root-relative URL.
    let html = page(
        r#"
        <div class="product-card">
          <h3><a href="/products/real">Real</a></h3>
          <img data-src="//cdn.shopify.com/no-image_600x.png">
          <img class="product__image" src="/files/real_600x.jpg">
        </div>
        "#,
    );

    let products = extractor().extract_products(&html);
    assert_eq!(
        products[0].image_url,
        Some("https://siptequila.com/files/real_600x.jpg".to_string())
    );
}

#[test]
fn test_image_prefers_lazy_attribute_and_normalizes_protocol() {
    let html = page(
        r#"
        <div class="product-card">
          <h3><a href="/products/lazy">Lazy</a></h3>
          <img data-src="//cdn.shopify.com/files/lazy_600x.jpg" src="/assets/loading.gif">
        </div>
        "#,
    );

    let products = extractor().extract_products(&html);
    assert_eq!(
        products[0].image_url,
        Some("https://cdn.shopify.com/files/lazy_600x.jpg".to_string())
    );
}

#[test]
fn test_missing_image_is_none() {
    let html = page(r#"<div class="product-card"><h3><a href="/products/bare">Bare</a></h3></div>"#);

    let products = extractor().extract_products(&html);
    assert_eq!(products[0].image_url, None);
}

#[test]
fn test_empty_page_yields_no_products() {
    let html = page(r#"<div class="collection-empty">No products found</div>"#);
    assert!(extractor().extract_products(&html).is_empty());
}
