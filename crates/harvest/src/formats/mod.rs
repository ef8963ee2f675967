// ABOUTME: Output writers for harvested records.
// ABOUTME: Saves the record list as pretty JSON, a CSV table and an Excel workbook under per-format folders.

pub mod csv;
pub mod json;
pub mod xlsx;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use partlib_catalog::{CatalogRecord, ComponentClass};
use tracing::{info, warn};

use crate::error::HarvestError;

pub use self::csv::{write_csv, write_csv_to};
pub use self::json::{to_json_string, write_json};
pub use self::xlsx::write_xlsx;

/// Supported on-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
    Xlsx,
}

impl Format {
    /// Every format `save_all` writes, in order.
    pub const ALL: [Format; 3] = [Format::Json, Format::Csv, Format::Xlsx];
}

impl Format {
    /// Folder under the output directory that holds this format.
    pub fn folder(self) -> &'static str {
        match self {
            Format::Json => "JSONs",
            Format::Csv => "CSVs",
            Format::Xlsx => "Excels",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
            Format::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Format::Json => "JSON",
            Format::Csv => "CSV",
            Format::Xlsx => "Excel",
        };
        write!(f, "{}", s)
    }
}

/// What happened to one output format.
#[derive(Debug)]
pub enum SaveOutcome {
    Written {
        format: Format,
        path: PathBuf,
        records: usize,
    },
    /// Nothing to write; no file was created.
    Empty { format: Format },
    Failed {
        format: Format,
        error: HarvestError,
    },
}

impl SaveOutcome {
    pub fn format(&self) -> Format {
        match self {
            SaveOutcome::Written { format, .. }
            | SaveOutcome::Empty { format }
            | SaveOutcome::Failed { format, .. } => *format,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, SaveOutcome::Written { .. })
    }
}

/// `<out_dir>/<folder>/<base_name>.<ext>` for `format`.
pub fn output_path(out_dir: &Path, base_name: &str, format: Format) -> PathBuf {
    out_dir
        .join(format.folder())
        .join(format!("{}.{}", base_name, format.extension()))
}

/// Writes every format, creating folders as needed.
///
/// A failing format does not stop the others; each gets its own outcome.
pub fn save_all(
    out_dir: &Path,
    base_name: &str,
    records: &[CatalogRecord],
    class: ComponentClass,
) -> Vec<SaveOutcome> {
    Format::ALL
        .into_iter()
        .map(|format| {
            if records.is_empty() {
                warn!(%format, "no records to save");
                return SaveOutcome::Empty { format };
            }
            let path = output_path(out_dir, base_name, format);
            match save_one(&path, records, class, format) {
                Ok(()) => {
                    info!(%format, path = %path.display(), records = records.len(), "saved");
                    SaveOutcome::Written {
                        format,
                        path,
                        records: records.len(),
                    }
                }
                Err(error) => {
                    warn!(%format, %error, "save failed");
                    SaveOutcome::Failed { format, error }
                }
            }
        })
        .collect()
}

fn save_one(
    path: &Path,
    records: &[CatalogRecord],
    class: ComponentClass,
    format: Format,
) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            HarvestError::output(parent.display().to_string(), "create folder", Some(e.into()))
        })?;
    }
    match format {
        Format::Json => write_json(path, records),
        Format::Csv => write_csv(path, records, class),
        Format::Xlsx => write_xlsx(path, records, class),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_use_format_folders() {
        let p = output_path(Path::new("Outputs"), "FOJAN_Capacitors", Format::Csv);
        assert_eq!(p, Path::new("Outputs/CSVs/FOJAN_Capacitors.csv"));
        let p = output_path(Path::new("Outputs"), "x", Format::Json);
        assert_eq!(p, Path::new("Outputs/JSONs/x.json"));
    }

    #[test]
    fn empty_list_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = save_all(dir.path(), "none", &[], ComponentClass::Capacitor);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, SaveOutcome::Empty { .. })));
        assert!(!dir.path().join("JSONs").exists());
        assert!(!dir.path().join("CSVs").exists());
        assert!(!dir.path().join("Excels").exists());
    }

    #[test]
    fn every_format_lands_in_its_folder() {
        let dir = tempfile::tempdir().unwrap();
        let mut r = CatalogRecord::new("FCC0603X7R104K500").unwrap();
        r.capacitance = Some("100nF".into());
        let outcomes = save_all(dir.path(), "Capacitors-FOJAN", &[r], ComponentClass::Capacitor);

        let formats: Vec<Format> = outcomes.iter().map(|o| o.format()).collect();
        assert_eq!(formats, vec![Format::Json, Format::Csv, Format::Xlsx]);
        assert!(outcomes.iter().all(|o| o.is_written()));
        assert!(dir.path().join("JSONs/Capacitors-FOJAN.json").is_file());
        assert!(dir.path().join("CSVs/Capacitors-FOJAN.csv").is_file());
        assert!(dir.path().join("Excels/Capacitors-FOJAN.xlsx").is_file());
    }
}
