use std::path::Path;
use url::Url;

/// Reduce a product name to a filesystem-safe filename stem.
///
/// Keeps ASCII alphanumerics, spaces, hyphens and underscores, maps
/// spaces to underscores and caps the stem at 100 characters.
pub fn sanitize_stem(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    let stem: String = kept.trim_end().replace(' ', "_").chars().take(100).collect();
    if stem.is_empty() {
        "untitled".to_string()
    } else {
        stem
    }
}

/// File extension for an image URL, falling back to ".jpg" when the URL
/// has none or an implausible one.
pub fn image_extension(image_url: &str) -> String {
    let ext = Url::parse(image_url)
        .ok()
        .and_then(|u| {
            Path::new(u.path())
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
        })
        .unwrap_or_default();

    if !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        format!(".{}", ext)
    } else {
        ".jpg".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_stem_strips_and_joins() {
        assert_eq!(sanitize_stem("Añejo! Tequila (750ml)"), "Aejo_Tequila_750ml");
        assert_eq!(sanitize_stem("Don Julio 1942"), "Don_Julio_1942");
        assert_eq!(sanitize_stem("plain-name_ok"), "plain-name_ok");
    }

    #[test]
    fn test_sanitize_stem_output_charset() {
        let stem = sanitize_stem("Casa *Dragones* & Blanco / 100% Agave");
        assert!(
            stem.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        );
    }

    #[test]
    fn test_sanitize_stem_truncates_to_100() {
        let stem = sanitize_stem(&"a".repeat(150));
        assert_eq!(stem.len(), 100);
    }

    #[test]
    fn test_sanitize_stem_empty_fallback() {
        assert_eq!(sanitize_stem("¡¿·!"), "untitled");
    }

    #[test]
    fn test_image_extension_from_path() {
        assert_eq!(
            image_extension("https://cdn.shopify.com/s/files/tile_600x.png?v=169"),
            ".png"
        );
        assert_eq!(image_extension("https://cdn.example.com/image"), ".jpg");
    }

    #[test]
    fn test_image_extension_rejects_implausible() {
        assert_eq!(image_extension("https://x.example.com/a.verylongext"), ".jpg");
        assert_eq!(image_extension("not a url"), ".jpg");
    }
}
