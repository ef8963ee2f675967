// ABOUTME: JSON writer for harvested records.
// ABOUTME: Emits a pretty-printed UTF-8 array using the record's serde field names.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use partlib_catalog::CatalogRecord;

use crate::error::HarvestError;

/// Renders records as a pretty-printed JSON array.
pub fn to_json_string(records: &[CatalogRecord]) -> Result<String, HarvestError> {
    serde_json::to_string_pretty(records)
        .map_err(|e| HarvestError::output("", "encode json", Some(e.into())))
}

/// Writes records to `path` as a pretty-printed JSON array.
pub fn write_json(path: &Path, records: &[CatalogRecord]) -> Result<(), HarvestError> {
    let target = path.display().to_string();
    let file = File::create(path)
        .map_err(|e| HarvestError::output(&target, "create json", Some(e.into())))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, records)
        .map_err(|e| HarvestError::output(&target, "write json", Some(e.into())))?;
    w.flush()
        .map_err(|e| HarvestError::output(&target, "write json", Some(e.into())))
}
