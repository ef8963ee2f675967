// ABOUTME: Renders harvested records as a text part library (schematic symbol + parameters per part).
// ABOUTME: Footprints come from a package-size lookup table with a generic fallback name.

//! Part-library text output.
//!
//! The output is a single text document:
//!
//! ```text
//! # header comments
//!
//! StartComponents
//!
//! Component (Name "...") ...
//! ...
//! EndComponent
//!
//! EndComponents
//! ```
//!
//! Each component block carries fixed symbol geometry for its class, the
//! supplier/manufacturer parameters, the class attribute parameters and a
//! footprint name chosen by package size.

use crate::models::{CatalogRecord, ComponentClass, Field};
use crate::normalize::normalize_resistance;

/// Package sizes with a dedicated footprint.
pub const KNOWN_PACKAGES: &[&str] = &["0201", "0402", "0603", "0805", "1206", "1210", "1812", "2220"];

/// Names written into every component block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryOptions {
    pub supplier: String,
    pub manufacturer: String,
    /// Comment lines written before `StartComponents`, without the `# ` prefix.
    pub header: Vec<String>,
}

impl Default for LibraryOptions {
    fn default() -> Self {
        Self {
            supplier: "LCSC".to_string(),
            manufacturer: "FOJAN".to_string(),
            header: vec!["Part library generated by partlib".to_string()],
        }
    }
}

/// Fixed per-class symbol data.
struct Symbol {
    name_prefix: &'static str,
    des_prefix: &'static str,
    footprint_prefix: &'static str,
    comment: &'static str,
    geometry: &'static [&'static str],
}

static CAPACITOR: Symbol = Symbol {
    name_prefix: "CAP",
    des_prefix: "C?",
    footprint_prefix: "CAP Ceramic SMD",
    comment: "=Capacitance",
    geometry: &[
        r#"Pin (Location 0, 40.94) (Rotation 90) (PinType Passive) (Length 59.06) (Width 0) (Designator Hidden "2") (Name Hidden "2") (PinSwap 1) (PartSwap 1) (PinSeq 2) (Part 1)"#,
        r#"Pin (Location 0, -40.94) (Rotation 270) (PinType Passive) (Length 59.06) (Width 0) (Designator Hidden "1") (Name Hidden "1") (PinSwap 1) (PartSwap 1) (PinSeq 1) (Part 1)"#,
        "Line (Width 8) (Start 0, -18.11) (End 0, -37.8) (Part 1)",
        "Line (Width 8) (Start 0, 21.26) (End 0, 40.94) (Part 1)",
        "Line (Width 8) (Start -78.74, -18.11) (End 78.74, -18.11) (Part 1)",
        "Line (Width 8) (Start -78.74, 21.26) (End 78.74, 21.26) (Part 1)",
    ],
};

static RESISTOR: Symbol = Symbol {
    name_prefix: "RES",
    des_prefix: "R?",
    footprint_prefix: "RES SMD",
    comment: "=Resistance",
    geometry: &[
        r#"Pin (Location -101.57, 0) (Rotation 180) (PinType Passive) (Length 98.43) (Width 0) (Designator Hidden "2") (Name Hidden "2") (PinSwap 1) (PartSwap 1) (PinSeq 2) (Part 1)"#,
        r#"Pin (Location 101.57, 0) (Rotation 0) (PinType Passive) (Length 98.43) (Width 0) (Designator Hidden "1") (Name Hidden "1") (PinSwap 1) (PartSwap 1) (PinSeq 1) (Part 1)"#,
        "Line (Width 8) (Start 0, 39.37) (End -39.37, -39.37) (Part 1)",
        "Line (Width 8) (Start -39.37, -39.37) (End -78.74, 39.37) (Part 1)",
        "Line (Width 8) (Start -78.74, 39.37) (End -98.42, 0) (Part 1)",
        "Line (Width 8) (Start 0, 39.37) (End 39.37, -39.37) (Part 1)",
        "Line (Width 8) (Start 39.37, -39.37) (End 78.74, 39.37) (Part 1)",
        "Line (Width 8) (Start 78.74, 39.37) (End 98.42, 0) (Part 1)",
    ],
};

fn symbol(class: ComponentClass) -> &'static Symbol {
    match class {
        ComponentClass::Capacitor => &CAPACITOR,
        ComponentClass::Resistor => &RESISTOR,
    }
}

/// Footprint name for a package: size-specific when the package is in
/// [`KNOWN_PACKAGES`], otherwise the class's generic footprint.
pub fn footprint_for(class: ComponentClass, package: Option<&str>) -> String {
    let prefix = symbol(class).footprint_prefix;
    match package.map(str::trim) {
        Some(pkg) if KNOWN_PACKAGES.contains(&pkg) => format!("{} {}", prefix, pkg),
        _ => prefix.to_string(),
    }
}

/// Double quotes would terminate the value early.
fn quote(value: &str) -> String {
    value.replace('"', "'")
}

fn parameter(name: &str, value: &str, large: bool) -> String {
    let (location, height) = if large { ("150, -300", 137) } else { ("0, 0", 50) };
    format!(
        r#"Parameter (Name "{}") (Location {}) (Height {}) (Rotation 0) (Justification Center) (Value "{}") (Part 1)"#,
        name,
        location,
        height,
        quote(value)
    )
}

/// Attribute values as written into the library, after class-specific cleanup.
fn attribute_value(record: &CatalogRecord, field: Field) -> String {
    let raw = record.get_or_empty(field);
    match field {
        Field::Resistance => normalize_resistance(raw),
        Field::Tolerance => raw.replace('±', ""),
        _ => raw.to_string(),
    }
}

/// Component name: class prefix, package and the key attributes.
pub fn component_name(record: &CatalogRecord, class: ComponentClass) -> String {
    let package = record.get_or_empty(Field::Package);
    let name = match class {
        ComponentClass::Capacitor => format!(
            "{} {} {} {} {} {}",
            CAPACITOR.name_prefix,
            package,
            attribute_value(record, Field::Capacitance),
            attribute_value(record, Field::VoltageRating),
            attribute_value(record, Field::Tolerance),
            attribute_value(record, Field::TemperatureCoefficient),
        ),
        ComponentClass::Resistor => format!(
            "{} {} {} {}",
            RESISTOR.name_prefix,
            package,
            attribute_value(record, Field::Resistance),
            attribute_value(record, Field::Tolerance),
        ),
    };
    name.trim().to_string()
}

/// Renders one component block, terminated by `EndComponent` and a newline.
pub fn render_component(record: &CatalogRecord, class: ComponentClass, opts: &LibraryOptions) -> String {
    let sym = symbol(class);
    let mut description = record.get_or_empty(Field::Description).replace('±', "");
    if class == ComponentClass::Resistor {
        description = description.replace('Ω', "R");
    }

    let mut lines = Vec::with_capacity(24);
    lines.push(format!(
        r#"Component (Name "{}") (PartCount 1) (DesPrefix "{}")"#,
        quote(&component_name(record, class)),
        sym.des_prefix
    ));
    lines.extend(sym.geometry.iter().map(|g| g.to_string()));
    lines.push(parameter("Supplier", &opts.supplier, true));
    lines.push(parameter(
        "Supplier Part Number",
        record.get_or_empty(Field::SupplierPartNumber),
        true,
    ));
    lines.push(parameter("Manufacturer", &opts.manufacturer, false));
    lines.push(parameter(
        "Manufacturer Part Number",
        &record.manufacturer_part_number,
        false,
    ));
    lines.push(format!(r#"Description (Value "{}") (Part 1)"#, quote(&description)));
    for &field in class.attributes() {
        lines.push(parameter(field.header(), &attribute_value(record, field), true));
    }
    lines.push(format!(r#"Comment (Value "{}") (Part 1)"#, sym.comment));
    lines.push(format!(
        r#"Footprint (Name "{}")"#,
        footprint_for(class, record.package.as_deref())
    ));
    lines.push("EndComponent".to_string());

    let mut block = lines.join("\n");
    block.push('\n');
    block
}

/// Renders the whole library document for `records`.
pub fn render_library(records: &[CatalogRecord], class: ComponentClass, opts: &LibraryOptions) -> String {
    let mut out: Vec<String> = opts.header.iter().map(|h| format!("# {}", h)).collect();
    out.push(String::new());
    out.push("StartComponents".to_string());
    out.push(String::new());
    out.extend(records.iter().map(|r| render_component(r, class, opts)));
    out.push(String::new());
    out.push("EndComponents".to_string());
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacitor() -> CatalogRecord {
        let mut rec = CatalogRecord::new("0603B104K500NT").unwrap();
        rec.supplier_part_number = Some("C1591".into());
        rec.package = Some("0603".into());
        rec.capacitance = Some("100nF".into());
        rec.voltage_rating = Some("50V".into());
        rec.tolerance = Some("±10%".into());
        rec.temperature_coefficient = Some("X7R".into());
        rec.description = Some("100nF ±10% 50V X7R 0603".into());
        rec
    }

    #[test]
    fn footprint_lookup_and_generic_fallback() {
        assert_eq!(footprint_for(ComponentClass::Capacitor, Some("0805")), "CAP Ceramic SMD 0805");
        assert_eq!(footprint_for(ComponentClass::Resistor, Some("2220")), "RES SMD 2220");
        assert_eq!(footprint_for(ComponentClass::Resistor, Some("SOT-23")), "RES SMD");
        assert_eq!(footprint_for(ComponentClass::Capacitor, None), "CAP Ceramic SMD");
    }

    #[test]
    fn capacitor_name_strips_plus_minus() {
        assert_eq!(
            component_name(&capacitor(), ComponentClass::Capacitor),
            "CAP 0603 100nF 50V 10% X7R"
        );
    }

    #[test]
    fn resistor_name_uses_normalized_value() {
        let mut rec = CatalogRecord::new("RC0603").unwrap();
        rec.package = Some("0603".into());
        rec.resistance = Some("4.7kΩ".into());
        rec.tolerance = Some("±1%".into());
        assert_eq!(component_name(&rec, ComponentClass::Resistor), "RES 0603 4k7 1%");
    }

    #[test]
    fn component_block_has_parameters_and_footprint() {
        let block = render_component(&capacitor(), ComponentClass::Capacitor, &LibraryOptions::default());
        assert!(block.starts_with(r#"Component (Name "CAP 0603 100nF 50V 10% X7R") (PartCount 1) (DesPrefix "C?")"#));
        assert!(block.contains(r#"(Name "Supplier Part Number") (Location 150, -300) (Height 137) (Rotation 0) (Justification Center) (Value "C1591")"#));
        assert!(block.contains(r#"(Name "Manufacturer") (Location 0, 0) (Height 50) (Rotation 0) (Justification Center) (Value "FOJAN")"#));
        assert!(block.contains(r#"Description (Value "100nF 10% 50V X7R 0603") (Part 1)"#));
        assert!(block.contains(r#"(Name "Temperature Coefficient")"#));
        assert!(block.contains(r#"Footprint (Name "CAP Ceramic SMD 0603")"#));
        assert!(block.ends_with("EndComponent\n"));
    }

    #[test]
    fn resistor_description_maps_ohm_to_r() {
        let mut rec = CatalogRecord::new("RC1").unwrap();
        rec.description = Some("10kΩ ±1% 0402".into());
        let block = render_component(&rec, ComponentClass::Resistor, &LibraryOptions::default());
        assert!(block.contains(r#"Description (Value "10kR 1% 0402")"#));
        assert!(block.contains(r#"(DesPrefix "R?")"#));
        assert!(block.contains(r#"Comment (Value "=Resistance")"#));
    }

    #[test]
    fn document_framing() {
        let doc = render_library(&[capacitor()], ComponentClass::Capacitor, &LibraryOptions::default());
        assert!(doc.starts_with("# Part library generated by partlib\n\nStartComponents\n\nComponent"));
        assert!(doc.ends_with("EndComponent\n\n\nEndComponents"));
    }

    #[test]
    fn quotes_in_values_are_neutralized() {
        let mut rec = CatalogRecord::new("Q\"1").unwrap();
        rec.description = Some("say \"hi\"".into());
        let block = render_component(&rec, ComponentClass::Capacitor, &LibraryOptions::default());
        assert!(block.contains(r#"(Value "Q'1")"#));
        assert!(block.contains(r#"Description (Value "say 'hi'")"#));
    }
}
