use serde::{Deserialize, Serialize};

/// A product extracted from the listing, as persisted to the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product display name
    pub name: String,

    /// Detail-page URL; unique key within a catalog
    pub url: String,

    /// Display price, or the "Price not found" sentinel
    pub price: String,

    /// Primary image URL (absolute), if one was found
    pub image_url: Option<String>,

    /// Local filename of the downloaded image, if the fetch succeeded
    pub image_filename: Option<String>,
}

/// Extractor output for one listing tile, before image enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct RawProduct {
    pub name: String,
    pub url: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl RawProduct {
    /// Finished catalog record with the downloaded image filename attached
    pub fn into_record(self, image_filename: Option<String>) -> ProductRecord {
        ProductRecord {
            name: self.name,
            url: self.url,
            price: self.price,
            image_url: self.image_url,
            image_filename,
        }
    }
}

/// Summary statistics reported after a run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Number of unique products in the written catalog
    pub total_products: usize,

    /// Path of the catalog file
    pub output_file: String,

    /// RFC 3339 local timestamp of the run
    pub timestamp: String,
}
