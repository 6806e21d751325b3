use regex::Regex;
use url::Url;

/// Attribute names tried on an image element, lazy-load variants first
pub const IMAGE_ATTRS: &[&str] = &["data-src", "src", "data-srcset"];

/// Markers identifying stand-in images that should never be downloaded
const PLACEHOLDER_MARKERS: &[&str] = &["placeholder", "no-image"];

/// Currency amount: dollar sign followed by digits/commas and an optional
/// decimal part.
pub fn price_pattern() -> Regex {
    Regex::new(r"\$[0-9][0-9,]*(\.[0-9]+)?").expect("currency pattern is valid")
}

/// Apply the currency pattern to an element's text, falling back to the
/// trimmed text itself when no amount is present.
pub fn price_from_text(pattern: &Regex, text: &str) -> String {
    let trimmed = text.trim();
    match pattern.find(trimmed) {
        Some(m) => m.as_str().to_string(),
        None => trimmed.to_string(),
    }
}

/// True for image candidates that are stand-ins rather than product shots
pub fn is_placeholder(url: &str) -> bool {
    PLACEHOLDER_MARKERS.iter().any(|m| url.contains(m))
}

/// Resolve a possibly protocol-relative or root-relative URL against the
/// site origin.
pub fn absolutize(origin: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }
    origin.join(raw).ok().map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://siptequila.com/").unwrap()
    }

    #[test]
    fn test_price_from_text_extracts_amount() {
        let pattern = price_pattern();
        assert_eq!(price_from_text(&pattern, "Sale price$49.99"), "$49.99");
        assert_eq!(price_from_text(&pattern, "$1,299.00 USD"), "$1,299.00");
    }

    #[test]
    fn test_price_from_text_falls_back_to_raw() {
        let pattern = price_pattern();
        assert_eq!(price_from_text(&pattern, "  Contact us  "), "Contact us");
    }

    #[test]
    fn test_absolutize_protocol_relative() {
        assert_eq!(
            absolutize(&origin(), "//cdn.example.com/x.jpg"),
            Some("https://cdn.example.com/x.jpg".to_string())
        );
    }

    #[test]
    fn test_absolutize_root_relative() {
        assert_eq!(
            absolutize(&origin(), "/products/x.jpg"),
            Some("https://siptequila.com/products/x.jpg".to_string())
        );
    }

    #[test]
    fn test_absolutize_leaves_absolute_urls() {
        assert_eq!(
            absolutize(&origin(), "https://cdn.example.com/x.jpg"),
            Some("https://cdn.example.com/x.jpg".to_string())
        );
        assert_eq!(absolutize(&origin(), ""), None);
    }

    #[test]
    fn test_is_placeholder() {
        assert!(is_placeholder("https://cdn.example.com/placeholder.svg"));
        assert!(is_placeholder("//cdn.example.com/no-image_600x.png"));
        assert!(!is_placeholder("https://cdn.example.com/bottle_600x.jpg"));
    }
}
