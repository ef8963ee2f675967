// ABOUTME: Site conventions the row extractor depends on, expressed as data (CatalogLayout).
// ABOUTME: Built-in capacitor and resistor layouts are embedded JSON; files can override them.

//! Catalog layouts.
//!
//! A [`CatalogLayout`] names the selectors that identify rows, the anchor
//! elements carrying part numbers and links, the description element, and
//! the ordinal position of each specification cell.
//!
//! Column positions are a hard coupling to one table layout. Nothing here
//! can detect that the storefront added, removed or reordered a column: an
//! out-of-date map silently yields wrong or empty attribute values.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::{ComponentClass, Field};

/// Embedded JSON containing the built-in layouts, one per component class.
const BUILTIN_LAYOUTS_JSON: &str = include_str!("../data/layouts.json");

/// A specification cell position: `field` is read from the `index`-th cell
/// matched by [`CatalogLayout::spec_cell_selector`] within a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub field: Field,
    pub index: usize,
}

/// Selectors and column positions for one catalog table layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLayout {
    pub class: ComponentClass,
    /// Selects one element per catalog row.
    pub row_selector: String,
    /// Rows whose text contains this marker are aggregated listings and skipped.
    #[serde(default)]
    pub skip_marker: Option<String>,
    /// Anchor whose text is the manufacturer part number.
    pub part_number_selector: String,
    /// Anchor whose text is the supplier part number and whose href is the detail link.
    pub supplier_selector: String,
    /// Supplier numbers not starting with this prefix are ignored.
    #[serde(default)]
    pub supplier_prefix: String,
    /// Base URL that relative detail hrefs are joined onto.
    pub link_base: String,
    pub description_selector: String,
    pub description_attr: String,
    /// Selects the specification cells of a row; positions index into this list.
    pub spec_cell_selector: String,
    /// Cell text meaning "no value".
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Next-page control, used by the pagination driver.
    pub next_page_selector: String,
    pub columns: Vec<ColumnSpec>,
}

fn default_placeholder() -> String {
    "-".to_string()
}

impl CatalogLayout {
    /// Parses a single layout from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let layout: CatalogLayout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Checks that required selectors are present and that no field is
    /// mapped to two columns.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let required = [
            ("row_selector", &self.row_selector),
            ("part_number_selector", &self.part_number_selector),
            ("spec_cell_selector", &self.spec_cell_selector),
            ("next_page_selector", &self.next_page_selector),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CatalogError::layout(format!("{} must not be empty", name)));
            }
        }

        for (i, col) in self.columns.iter().enumerate() {
            if col.field == Field::ManufacturerPartNumber {
                return Err(CatalogError::layout(
                    "the manufacturer part number is read from its anchor, not a column",
                ));
            }
            if self.columns[..i].iter().any(|c| c.field == col.field) {
                return Err(CatalogError::layout(format!(
                    "field `{}` is mapped more than once",
                    col.field
                )));
            }
        }
        Ok(())
    }

    /// Cell position configured for `field`, if any.
    pub fn column_of(&self, field: Field) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.index)
    }
}

/// Loads the built-in layout for `class`.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed or lacks an entry for `class`.
pub fn load_builtin_layout(class: ComponentClass) -> CatalogLayout {
    let layouts: Vec<CatalogLayout> =
        serde_json::from_str(BUILTIN_LAYOUTS_JSON).expect("failed to parse builtin layouts");

    layouts
        .into_iter()
        .find(|l| l.class == class)
        .expect("builtin layouts cover every component class")
}
