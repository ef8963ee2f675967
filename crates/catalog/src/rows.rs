// ABOUTME: Record extractor turning rendered catalog rows into CatalogRecords.
// ABOUTME: Prefers fixed-position table cells, falls back to description patterns, dedups via SeenSet.

//! Row extraction.
//!
//! Field resolution order for every attribute:
//! 1. the specification cell at the layout's fixed ordinal position, unless
//!    it is missing, empty or the placeholder;
//! 2. the attribute family's pattern table run over the row description.
//!
//! Rows without a manufacturer part number produce nothing. Duplicates are
//! decided by the caller-owned [`SeenSet`]: the first occurrence of a part
//! number wins and later rows with the same number are dropped whole, even
//! if they carry fields the kept record lacks.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::error::CatalogError;
use crate::layout::CatalogLayout;
use crate::models::{CatalogRecord, ComponentClass, Field};
use crate::patterns::{find_first, Family};

/// Part numbers already emitted during one traversal.
#[derive(Debug, Clone, Default)]
pub struct SeenSet {
    keys: HashSet<String>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key`; returns `true` if it had not been seen before.
    pub fn insert(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Outcome of extracting one rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    /// New records, in page order.
    pub records: Vec<CatalogRecord>,
    /// Rows considered (aggregated-listing rows excluded).
    pub rows: usize,
    /// Rows without a resolvable manufacturer part number.
    pub dropped: usize,
    /// Rows whose part number was already seen in this run.
    pub duplicates: usize,
    /// Aggregated-listing rows skipped before parsing.
    pub skipped_markers: usize,
}

/// Pattern family used when a field's cell yields nothing.
fn fallback_family(field: Field) -> Option<Family> {
    match field {
        Field::Capacitance => Some(Family::Capacitance),
        Field::Tolerance => Some(Family::Tolerance),
        Field::VoltageRating => Some(Family::Voltage),
        Field::TemperatureCoefficient => Some(Family::TemperatureCoefficient),
        Field::Resistance => Some(Family::Resistance),
        Field::Power => Some(Family::Power),
        _ => None,
    }
}

/// Concatenates an element's text nodes, each trimmed.
fn joined_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

fn compile(css: &str) -> Result<Selector, CatalogError> {
    Selector::parse(css).map_err(|e| CatalogError::selector(css, e))
}

/// Extracts [`CatalogRecord`]s from rendered catalog pages.
#[derive(Debug)]
pub struct RowExtractor {
    layout: CatalogLayout,
    row: Selector,
    part_number: Selector,
    supplier: Selector,
    description: Selector,
    spec_cell: Selector,
    link_base: Url,
}

impl RowExtractor {
    /// Compiles every selector of `layout` once.
    pub fn new(layout: CatalogLayout) -> Result<Self, CatalogError> {
        layout.validate()?;
        let link_base = Url::parse(&layout.link_base).map_err(|e| {
            CatalogError::layout(format!("bad link_base `{}`: {}", layout.link_base, e))
        })?;
        Ok(Self {
            row: compile(&layout.row_selector)?,
            part_number: compile(&layout.part_number_selector)?,
            supplier: compile(&layout.supplier_selector)?,
            description: compile(&layout.description_selector)?,
            spec_cell: compile(&layout.spec_cell_selector)?,
            link_base,
            layout,
        })
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    pub fn class(&self) -> ComponentClass {
        self.layout.class
    }

    /// Extracts every new record from one rendered page, updating `seen`.
    pub fn extract_all(&self, html: &str, seen: &mut SeenSet) -> PageExtraction {
        let doc = Html::parse_document(html);
        let mut page = PageExtraction::default();

        for row in doc.select(&self.row) {
            if self.is_aggregate_row(row) {
                page.skipped_markers += 1;
                continue;
            }
            page.rows += 1;

            let Some(record) = self.extract_one(row) else {
                page.dropped += 1;
                debug!(row = page.rows, "row has no manufacturer part number, dropped");
                continue;
            };

            if seen.insert(&record.manufacturer_part_number) {
                page.records.push(record);
            } else {
                page.duplicates += 1;
                debug!(mpn = %record.manufacturer_part_number, "duplicate part number, dropped");
            }
        }

        page
    }

    /// Counts the rows `extract_all` would visit, without parsing them.
    pub fn count_rows(&self, html: &str) -> usize {
        Html::parse_document(html).select(&self.row).count()
    }

    /// Builds a record from one row, or `None` when the row has no
    /// manufacturer part number.
    pub fn extract_one(&self, row: ElementRef<'_>) -> Option<CatalogRecord> {
        let mpn = row.select(&self.part_number).next().map(joined_text)?;
        let mut record = CatalogRecord::new(mpn)?;

        if let Some(anchor) = row.select(&self.supplier).next() {
            let number = joined_text(anchor);
            if !number.is_empty() && number.starts_with(&self.layout.supplier_prefix) {
                record.set(Field::SupplierPartNumber, number);
                if let Some(link) = anchor.value().attr("href").and_then(|h| self.resolve_link(h)) {
                    record.set(Field::Link, link);
                }
            }
        }

        let description = row
            .select(&self.description)
            .next()
            .and_then(|el| el.value().attr(&self.layout.description_attr))
            .map(|d| d.trim().to_string())
            .unwrap_or_default();
        if !description.is_empty() {
            record.set(Field::Description, description.clone());
        }

        let cells: Vec<ElementRef<'_>> = row.select(&self.spec_cell).collect();
        let fields = std::iter::once(Field::Package).chain(self.class().attributes().iter().copied());
        for field in fields {
            if let Some(value) = self.resolve(field, &cells, &description) {
                record.set(field, value);
            }
        }

        Some(record)
    }

    fn resolve(&self, field: Field, cells: &[ElementRef<'_>], description: &str) -> Option<String> {
        let from_cell = self
            .layout
            .column_of(field)
            .and_then(|i| cells.get(i))
            .map(|cell| joined_text(*cell))
            .filter(|v| !v.is_empty() && *v != self.layout.placeholder);

        from_cell.or_else(|| fallback_family(field).and_then(|fam| find_first(description, fam)))
    }

    fn is_aggregate_row(&self, row: ElementRef<'_>) -> bool {
        match self.layout.skip_marker.as_deref() {
            Some(marker) if !marker.is_empty() => row.text().collect::<String>().contains(marker),
            _ => false,
        }
    }

    fn resolve_link(&self, href: &str) -> Option<String> {
        self.link_base.join(href.trim()).ok().map(String::from)
    }
}
