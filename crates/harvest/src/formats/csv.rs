// ABOUTME: CSV writer for harvested records.
// ABOUTME: Column order follows the component class; absent values become empty cells.

use std::io;
use std::path::Path;

use partlib_catalog::{CatalogRecord, ComponentClass};

use crate::error::HarvestError;

/// Writes records as CSV to any writer.
pub fn write_csv_to<W: io::Write>(
    writer: W,
    records: &[CatalogRecord],
    class: ComponentClass,
) -> Result<(), csv::Error> {
    let columns = class.columns();
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(columns.iter().map(|f| f.header()))?;
    for record in records {
        wtr.write_record(columns.iter().map(|f| record.get_or_empty(*f)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes records to `path` as CSV.
pub fn write_csv(
    path: &Path,
    records: &[CatalogRecord],
    class: ComponentClass,
) -> Result<(), HarvestError> {
    let target = path.display().to_string();
    let file = std::fs::File::create(path)
        .map_err(|e| HarvestError::output(&target, "create csv", Some(e.into())))?;
    write_csv_to(file, records, class)
        .map_err(|e| HarvestError::output(&target, "write csv", Some(e.into())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacitor_columns_in_order() {
        let mut r = CatalogRecord::new("FCC0603X7R104K500").unwrap();
        r.capacitance = Some("100nF".into());
        r.description = Some("50V, 100nF".into());

        let mut buf = Vec::new();
        write_csv_to(&mut buf, &[r], ComponentClass::Capacitor).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Manufacturer Part Number,Supplier Part Number,Description,Package,Capacitance,Tolerance,Voltage Rating,Temperature Coefficient,Link"
        );
        assert_eq!(
            lines.next().unwrap(),
            "FCC0603X7R104K500,,\"50V, 100nF\",,100nF,,,,"
        );
    }

    #[test]
    fn resistor_header() {
        let mut buf = Vec::new();
        write_csv_to(&mut buf, &[], ComponentClass::Resistor).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.trim_end(),
            "Manufacturer Part Number,Supplier Part Number,Description,Package,Resistance,Tolerance,Voltage Rating,Power,Link"
        );
    }
}
