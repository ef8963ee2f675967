// ABOUTME: CLI binary for the partlib catalog harvester.
// ABOUTME: Walks a live catalog (or saved pages) and writes JSON, CSV and Excel exports with a summary.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use partlib_catalog::{CatalogLayout, CatalogRecord, ComponentClass, FieldCompletion};
use partlib_harvest::formats::to_json_string;
use partlib_harvest::{
    save_all, BrowserOptions, ChromeSession, HarvesterBuilder, SaveOutcome, SavedPages,
    Traversal,
};
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

#[derive(Parser, Debug)]
#[command(name = "harvest")]
#[command(about = "Collect component listings from a paginated catalog")]
struct Args {
    /// Catalog listing URL to start from
    #[arg(required_unless_present = "html")]
    url: Option<String>,

    /// Component class, selects column layout and export columns
    #[arg(short = 'c', long = "class", value_enum, default_value = "capacitor")]
    class: ClassArg,

    /// Stop after this many pages (default: walk every page)
    #[arg(short = 'n', long = "max-pages", value_parser = clap::value_parser!(u64).range(1..))]
    max_pages: Option<u64>,

    /// Run the browser without a window
    #[arg(long = "headless")]
    headless: bool,

    /// JSON file with a custom catalog layout
    #[arg(long = "layout")]
    layout: Option<PathBuf>,

    /// Output root; files land in <DIR>/JSONs, <DIR>/CSVs and <DIR>/Excels
    #[arg(short = 'o', long = "out-dir", default_value = "Outputs")]
    out_dir: PathBuf,

    /// Base file name (default: <Class plural>-<brand>)
    #[arg(long = "name")]
    name: Option<String>,

    /// Brand used in the default file name
    #[arg(long = "brand", default_value = "FOJAN")]
    brand: String,

    /// Minimum delay between pages, in seconds
    #[arg(long = "min-delay", default_value_t = 2.0)]
    min_delay: f64,

    /// Maximum delay between pages, in seconds
    #[arg(long = "max-delay", default_value_t = 4.0)]
    max_delay: f64,

    /// How long to wait for rows to render, in seconds
    #[arg(long = "page-timeout", default_value_t = 15.0)]
    page_timeout: f64,

    /// How long to wait for the next page's rows after clicking next, in seconds
    #[arg(long = "next-timeout", default_value_t = 10.0)]
    next_timeout: f64,

    /// Browser user agent (default: a desktop Chrome string)
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Saved rendered pages to process instead of a live catalog, in page order
    #[arg(long = "html", num_args = 1.., conflicts_with = "url")]
    html: Vec<PathBuf>,

    /// Print records as JSON to stdout instead of writing files
    #[arg(long = "json")]
    json_output: bool,
}

fn seconds(name: &str, value: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(value).with_context(|| format!("invalid --{} value {}", name, value))
}

fn builder(args: &Args) -> anyhow::Result<HarvesterBuilder> {
    let mut b = HarvesterBuilder::new().class(args.class.into());
    if let Some(path) = &args.layout {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading layout {}", path.display()))?;
        let layout = CatalogLayout::from_json(&json)
            .with_context(|| format!("parsing layout {}", path.display()))?;
        if layout.class != ComponentClass::from(args.class) {
            bail!(
                "layout {} is for {}, not {}",
                path.display(),
                layout.class,
                ComponentClass::from(args.class)
            );
        }
        b = b.layout(layout);
    }
    b = b
        .row_timeout(seconds("page-timeout", args.page_timeout)?)
        .post_click_timeout(seconds("next-timeout", args.next_timeout)?)
        .delay_range(
            seconds("min-delay", args.min_delay)?,
            seconds("max-delay", args.max_delay)?,
        );
    if !args.html.is_empty() {
        b = b.without_pauses();
    }
    Ok(b)
}

fn harvest(args: &Args) -> anyhow::Result<Traversal> {
    let b = builder(args)?;
    let max_pages = args.max_pages.map(|n| n as usize);

    if !args.html.is_empty() {
        let session = SavedPages::from_files(&args.html)?;
        let mut harvester = b.build(session)?;
        return Ok(harvester.traverse("saved pages", max_pages)?);
    }

    let url = args.url.as_deref().context("a catalog URL is required")?;
    let mut browser = BrowserOptions {
        headless: args.headless,
        ..BrowserOptions::default()
    };
    if let Some(ua) = &args.user_agent {
        browser.user_agent = Some(ua.clone());
    }
    let session = ChromeSession::launch(&browser)?;
    let mut harvester = b.build(session)?;
    Ok(harvester.traverse(url, max_pages)?)
}

fn print_summary(run: &Traversal, class: ComponentClass) {
    println!("{} summary", class.plural());
    println!("Pages processed: {} ({})", run.pages, run.stop);
    print!("{}", FieldCompletion::from_records(&run.records, class));
    if !run.records.is_empty() {
        println!();
        println!("First {}:", run.records.len().min(3));
        for (i, r) in run.records.iter().take(3).enumerate() {
            print_record(i + 1, r, class);
        }
    }
}

fn print_record(n: usize, r: &CatalogRecord, class: ComponentClass) {
    let na = |v: Option<&str>| v.unwrap_or("N/A").to_string();
    println!("{}. {}", n, r.manufacturer_part_number);
    println!("   Supplier: {}", na(r.supplier_part_number.as_deref()));
    println!("   Package: {}", na(r.package.as_deref()));
    let specs: Vec<String> = class
        .attributes()
        .iter()
        .map(|f| na(r.get(*f)))
        .collect();
    println!("   Specs: {}", specs.join(" | "));
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let class = ComponentClass::from(args.class);
    let run = harvest(args)?;

    if args.json_output {
        println!("{}", to_json_string(&run.records)?);
        return Ok(true);
    }

    print_summary(&run, class);
    if run.records.is_empty() {
        println!("No {} were collected", class.plural().to_lowercase());
        return Ok(true);
    }

    let base = args
        .name
        .clone()
        .unwrap_or_else(|| format!("{}-{}", class.plural(), args.brand));
    let mut ok = true;
    println!();
    for outcome in save_all(&args.out_dir, &base, &run.records, class) {
        match outcome {
            SaveOutcome::Written {
                format,
                path,
                records,
            } => println!("{}: {} records -> {}", format, records, path.display()),
            SaveOutcome::Empty { format } => println!("{}: nothing to write", format),
            SaveOutcome::Failed { format, error } => {
                eprintln!("{}: {}", format, error);
                ok = false;
            }
        }
    }
    Ok(ok)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
