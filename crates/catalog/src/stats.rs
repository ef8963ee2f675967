// ABOUTME: Field completion statistics over a harvested record set.
// ABOUTME: Reports, per export column, how many records carry a value.

use std::fmt;

use crate::models::{CatalogRecord, ComponentClass, Field};

/// Fill count of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCount {
    pub field: Field,
    pub filled: usize,
    pub total: usize,
}

impl FieldCount {
    /// Percentage of records carrying the field; `0.0` for an empty set.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.filled as f64 * 100.0 / self.total as f64
        }
    }
}

/// Per-column completion for one component class.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCompletion {
    pub total: usize,
    pub fields: Vec<FieldCount>,
}

impl FieldCompletion {
    pub fn from_records(records: &[CatalogRecord], class: ComponentClass) -> Self {
        let total = records.len();
        let fields = class
            .columns()
            .into_iter()
            .map(|field| FieldCount {
                field,
                filled: records.iter().filter(|r| r.get(field).is_some()).count(),
                total,
            })
            .collect();
        Self { total, fields }
    }

    pub fn get(&self, field: Field) -> Option<&FieldCount> {
        self.fields.iter().find(|f| f.field == field)
    }
}

impl fmt::Display for FieldCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total unique products: {}", self.total)?;
        for c in &self.fields {
            writeln!(
                f,
                "  {:25} {:4}/{:4} ({:5.1}%)",
                c.field.header(),
                c.filled,
                c.total,
                c.percent()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_filled_fields() {
        let mut a = CatalogRecord::new("A").unwrap();
        a.package = Some("0603".into());
        let b = CatalogRecord::new("B").unwrap();

        let stats = FieldCompletion::from_records(&[a, b], ComponentClass::Capacitor);
        assert_eq!(stats.total, 2);
        let mpn = stats.get(Field::ManufacturerPartNumber).unwrap();
        assert_eq!(mpn.filled, 2);
        let pkg = stats.get(Field::Package).unwrap();
        assert_eq!(pkg.filled, 1);
        assert!((pkg.percent() - 50.0).abs() < f64::EPSILON);
        assert!(stats.get(Field::Power).is_none());
    }

    #[test]
    fn empty_set_reports_zero_percent() {
        let stats = FieldCompletion::from_records(&[], ComponentClass::Resistor);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.get(Field::Resistance).unwrap().percent(), 0.0);
        assert!(stats.to_string().starts_with("Total unique products: 0"));
    }
}
