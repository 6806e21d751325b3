use crate::records::{ProductRecord, RunSummary};
use chrono::Local;
use std::error::Error;

/// Write the catalog as a pretty-printed JSON array, overwriting any
/// previous output.
pub fn save_catalog(path: &str, records: &[ProductRecord]) -> Result<RunSummary, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    ::log::info!("Saved {} unique products to {}", records.len(), path);

    Ok(RunSummary {
        total_products: records.len(),
        output_file: path.to_string(),
        timestamp: Local::now().to_rfc3339(),
    })
}
