// ABOUTME: CLI that turns harvested catalog JSON into a part-library text file.
// ABOUTME: Reads the records written by harvest and renders one component block per record.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use partlib_catalog::{records_from_json, render_library, ComponentClass, LibraryOptions};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ClassArg {
    Capacitor,
    Resistor,
}

impl From<ClassArg> for ComponentClass {
    fn from(c: ClassArg) -> Self {
        match c {
            ClassArg::Capacitor => ComponentClass::Capacitor,
            ClassArg::Resistor => ComponentClass::Resistor,
        }
    }
}

/// Convert harvested records into a part-library import file.
#[derive(Parser, Debug)]
#[command(name = "partlib-librarian")]
#[command(about = "Render harvested catalog JSON as a part-library file", long_about = None)]
struct Args {
    /// Component class of the input records.
    #[arg(short = 'c', long, value_enum, default_value = "capacitor")]
    class: ClassArg,

    /// Harvested JSON (default: Outputs/JSONs/<Class plural>-<manufacturer>.json).
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Library file to write, or "-" for stdout (default: Outputs/Components/<Class plural>.txt).
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Manufacturer name written into every component.
    #[arg(long, default_value = "FOJAN")]
    manufacturer: String,

    /// Supplier name written into every component.
    #[arg(long, default_value = "LCSC")]
    supplier: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let class = ComponentClass::from(args.class);

    let input = args.input.clone().unwrap_or_else(|| {
        PathBuf::from("Outputs")
            .join("JSONs")
            .join(format!("{}-{}.json", class.plural(), args.manufacturer))
    });
    let json = fs::read_to_string(&input).with_context(|| {
        format!(
            "reading {} (run harvest first to produce it)",
            input.display()
        )
    })?;
    let records = records_from_json(&json)
        .with_context(|| format!("parsing records from {}", input.display()))?;
    if records.is_empty() {
        warn!(input = %input.display(), "no records in input");
    }

    let opts = LibraryOptions {
        supplier: args.supplier.clone(),
        manufacturer: args.manufacturer.clone(),
        ..LibraryOptions::default()
    };
    let library = render_library(&records, class, &opts);

    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from("Outputs")
            .join("Components")
            .join(format!("{}.txt", class.plural()))
    });
    if output.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(library.as_bytes())?;
        stdout.write_all(b"\n")?;
        return Ok(());
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&output, &library).with_context(|| format!("writing {}", output.display()))?;
    info!(components = records.len(), output = %output.display(), "library written");
    println!(
        "Created {} components in {}",
        records.len(),
        output.display()
    );
    Ok(())
}
