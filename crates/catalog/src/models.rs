// ABOUTME: Data model for harvested catalog rows: CatalogRecord, ComponentClass and Field.
// ABOUTME: Serde names match the column headers of the JSON and CSV exports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The component family a catalog listing belongs to.
///
/// Selects the column layout used during extraction, the attribute columns of
/// the tabular export and the part-library template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentClass {
    #[default]
    Capacitor,
    Resistor,
}

impl ComponentClass {
    /// Class-specific attributes, in export column order.
    pub fn attributes(self) -> &'static [Field] {
        match self {
            ComponentClass::Capacitor => &[
                Field::Capacitance,
                Field::Tolerance,
                Field::VoltageRating,
                Field::TemperatureCoefficient,
            ],
            ComponentClass::Resistor => &[
                Field::Resistance,
                Field::Tolerance,
                Field::VoltageRating,
                Field::Power,
            ],
        }
    }

    /// Every exported column for this class: identifiers, description,
    /// package, the class attributes and finally the detail link.
    pub fn columns(self) -> Vec<Field> {
        let mut cols = vec![
            Field::ManufacturerPartNumber,
            Field::SupplierPartNumber,
            Field::Description,
            Field::Package,
        ];
        cols.extend_from_slice(self.attributes());
        cols.push(Field::Link);
        cols
    }

    /// Plural name used for default output file names.
    pub fn plural(self) -> &'static str {
        match self {
            ComponentClass::Capacitor => "Capacitors",
            ComponentClass::Resistor => "Resistors",
        }
    }
}

impl fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ComponentClass::Capacitor => "capacitor",
            ComponentClass::Resistor => "resistor",
        };
        write!(f, "{}", s)
    }
}

/// A single field of a [`CatalogRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ManufacturerPartNumber,
    SupplierPartNumber,
    Link,
    Description,
    Package,
    Capacitance,
    Tolerance,
    VoltageRating,
    TemperatureCoefficient,
    Resistance,
    Power,
}

impl Field {
    /// Human-readable column header, as used by the CSV export.
    pub fn header(self) -> &'static str {
        match self {
            Field::ManufacturerPartNumber => "Manufacturer Part Number",
            Field::SupplierPartNumber => "Supplier Part Number",
            Field::Link => "Link",
            Field::Description => "Description",
            Field::Package => "Package",
            Field::Capacitance => "Capacitance",
            Field::Tolerance => "Tolerance",
            Field::VoltageRating => "Voltage Rating",
            Field::TemperatureCoefficient => "Temperature Coefficient",
            Field::Resistance => "Resistance",
            Field::Power => "Power",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// One distinct component listing scraped from the catalog.
///
/// `None` means "not discovered"; the extractor never stores empty strings
/// or the catalog's `-` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "Manufacturer Part Number")]
    pub manufacturer_part_number: String,
    #[serde(rename = "Supplier Part Number", default, skip_serializing_if = "Option::is_none")]
    pub supplier_part_number: Option<String>,
    #[serde(rename = "Link", default, skip_serializing_if = "Option::is_none")]
    pub detail_link: Option<String>,
    #[serde(rename = "description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Package", default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(rename = "Capacitance", default, skip_serializing_if = "Option::is_none")]
    pub capacitance: Option<String>,
    #[serde(rename = "Tolerance", default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<String>,
    #[serde(rename = "Voltage Rating", default, skip_serializing_if = "Option::is_none")]
    pub voltage_rating: Option<String>,
    #[serde(
        rename = "Temperature Coefficient",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature_coefficient: Option<String>,
    #[serde(rename = "Resistance", default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<String>,
    #[serde(rename = "Power", default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
}

impl CatalogRecord {
    /// Creates a record with only the identifying field set.
    ///
    /// Returns `None` when the part number is blank.
    pub fn new(manufacturer_part_number: impl Into<String>) -> Option<Self> {
        let mpn = manufacturer_part_number.into();
        let mpn = mpn.trim();
        if mpn.is_empty() {
            return None;
        }
        Some(Self {
            manufacturer_part_number: mpn.to_string(),
            supplier_part_number: None,
            detail_link: None,
            description: None,
            package: None,
            capacitance: None,
            tolerance: None,
            voltage_rating: None,
            temperature_coefficient: None,
            resistance: None,
            power: None,
        })
    }

    /// Returns the value of `field`, if discovered.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::ManufacturerPartNumber => Some(self.manufacturer_part_number.as_str()),
            Field::SupplierPartNumber => self.supplier_part_number.as_deref(),
            Field::Link => self.detail_link.as_deref(),
            Field::Description => self.description.as_deref(),
            Field::Package => self.package.as_deref(),
            Field::Capacitance => self.capacitance.as_deref(),
            Field::Tolerance => self.tolerance.as_deref(),
            Field::VoltageRating => self.voltage_rating.as_deref(),
            Field::TemperatureCoefficient => self.temperature_coefficient.as_deref(),
            Field::Resistance => self.resistance.as_deref(),
            Field::Power => self.power.as_deref(),
        }
    }

    /// Like [`get`](Self::get) but yields `""` for absent fields.
    pub fn get_or_empty(&self, field: Field) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Sets an optional field. Blank values are stored as absent and the
    /// identifying field is never overwritten.
    pub(crate) fn set(&mut self, field: Field, value: String) {
        let value = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        let slot = match field {
            Field::ManufacturerPartNumber => return,
            Field::SupplierPartNumber => &mut self.supplier_part_number,
            Field::Link => &mut self.detail_link,
            Field::Description => &mut self.description,
            Field::Package => &mut self.package,
            Field::Capacitance => &mut self.capacitance,
            Field::Tolerance => &mut self.tolerance,
            Field::VoltageRating => &mut self.voltage_rating,
            Field::TemperatureCoefficient => &mut self.temperature_coefficient,
            Field::Resistance => &mut self.resistance,
            Field::Power => &mut self.power,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_blank_part_number() {
        assert!(CatalogRecord::new("").is_none());
        assert!(CatalogRecord::new("   ").is_none());
        let rec = CatalogRecord::new("  CL10B104KB8NNNC ").unwrap();
        assert_eq!(rec.manufacturer_part_number, "CL10B104KB8NNNC");
    }

    #[test]
    fn set_stores_blank_as_absent() {
        let mut rec = CatalogRecord::new("X").unwrap();
        rec.set(Field::Package, "0603".to_string());
        rec.set(Field::Tolerance, "  ".to_string());
        assert_eq!(rec.get(Field::Package), Some("0603"));
        assert_eq!(rec.get(Field::Tolerance), None);
        assert_eq!(rec.get_or_empty(Field::Tolerance), "");
    }

    #[test]
    fn json_omits_absent_fields_and_keeps_names() {
        let mut rec = CatalogRecord::new("FJ0603").unwrap();
        rec.set(Field::VoltageRating, "50V".to_string());
        rec.set(Field::Description, "100nF 50V".to_string());
        let json = serde_json::to_value(&rec).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["Manufacturer Part Number"], "FJ0603");
        assert_eq!(obj["Voltage Rating"], "50V");
        assert_eq!(obj["description"], "100nF 50V");
    }

    #[test]
    fn json_missing_keys_deserialize_as_none() {
        let rec: CatalogRecord =
            serde_json::from_str(r#"{"Manufacturer Part Number": "A1", "Power": "1/4W"}"#)
                .unwrap();
        assert_eq!(rec.power.as_deref(), Some("1/4W"));
        assert!(rec.package.is_none());
    }

    #[test]
    fn columns_follow_export_order() {
        let cols = ComponentClass::Resistor.columns();
        let headers: Vec<_> = cols.iter().map(|f| f.header()).collect();
        assert_eq!(
            headers,
            vec![
                "Manufacturer Part Number",
                "Supplier Part Number",
                "Description",
                "Package",
                "Resistance",
                "Tolerance",
                "Voltage Rating",
                "Power",
                "Link",
            ]
        );
    }
}
