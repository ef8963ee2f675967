// ABOUTME: Excel workbook writer for harvested records.
// ABOUTME: One sheet, header row from the class columns, widths sized to content up to a cap.

use std::path::Path;

use partlib_catalog::{CatalogRecord, ComponentClass};
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::error::HarvestError;

/// Widest a column is allowed to grow, in characters.
const MAX_COLUMN_WIDTH: usize = 50;

/// Column widths fitted to the longest cell (header included), plus padding.
pub fn column_widths(records: &[CatalogRecord], class: ComponentClass) -> Vec<usize> {
    class
        .columns()
        .into_iter()
        .map(|field| {
            let longest = records
                .iter()
                .map(|r| r.get_or_empty(field).chars().count())
                .chain(std::iter::once(field.header().chars().count()))
                .max()
                .unwrap_or(0);
            (longest + 2).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Builds the workbook in memory.
pub fn build_workbook(
    records: &[CatalogRecord],
    class: ComponentClass,
) -> Result<Workbook, XlsxError> {
    let columns = class.columns();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(format!("LCSC {}", class.plural()))?;

    for (col, field) in columns.iter().enumerate() {
        sheet.write_string(0, col as u16, field.header())?;
    }
    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, field) in columns.iter().enumerate() {
            if let Some(value) = record.get(*field) {
                sheet.write_string(row, col as u16, value)?;
            }
        }
    }
    for (col, width) in column_widths(records, class).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width as f64)?;
    }
    Ok(workbook)
}

/// Writes records to `path` as an Excel workbook.
pub fn write_xlsx(
    path: &Path,
    records: &[CatalogRecord],
    class: ComponentClass,
) -> Result<(), HarvestError> {
    let target = path.display().to_string();
    let mut workbook = build_workbook(records, class)
        .map_err(|e| HarvestError::output(&target, "build xlsx", Some(e.into())))?;
    workbook
        .save(path)
        .map_err(|e| HarvestError::output(&target, "write xlsx", Some(e.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_fit_content_and_cap() {
        let mut r = CatalogRecord::new("FCC0603X7R104K500").unwrap();
        r.description = Some("x".repeat(120));
        let widths = column_widths(&[r], ComponentClass::Capacitor);
        assert_eq!(widths.len(), 9);
        // "Manufacturer Part Number" is longer than the part number.
        assert_eq!(widths[0], "Manufacturer Part Number".len() + 2);
        assert_eq!(widths[2], MAX_COLUMN_WIDTH);
        assert_eq!(widths[3], "Package".len() + 2);
    }

    #[test]
    fn writes_zip_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Resistors-FOJAN.xlsx");
        let mut r = CatalogRecord::new("FRC0402F4701TS").unwrap();
        r.resistance = Some("4.7kΩ".into());

        write_xlsx(&path, &[r], ComponentClass::Resistor).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
