// ABOUTME: Core catalog parsing library for partlib.
// ABOUTME: Provides the record model, pattern extraction, value normalization, row extraction and library output.

pub mod error;
pub mod layout;
pub mod library;
pub mod models;
pub mod normalize;
pub mod patterns;
pub mod rows;
pub mod stats;

pub use error::CatalogError;
pub use layout::{load_builtin_layout, CatalogLayout, ColumnSpec};
pub use library::{footprint_for, render_library, LibraryOptions};
pub use models::{CatalogRecord, ComponentClass, Field};
pub use normalize::normalize_resistance;
pub use patterns::{find_capacitance, find_first, Family};
pub use rows::{PageExtraction, RowExtractor, SeenSet};
pub use stats::FieldCompletion;

/// Parses records previously written by the JSON exporter.
pub fn records_from_json(json: &str) -> Result<Vec<CatalogRecord>, CatalogError> {
    let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
    Ok(records
        .into_iter()
        .filter(|r| !r.manufacturer_part_number.trim().is_empty())
        .collect())
}
