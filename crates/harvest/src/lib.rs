// ABOUTME: Main library entry point for the partlib catalog harvester.
// ABOUTME: Re-exports the public API: Harvester, HarvesterBuilder, sessions, writers and HarvestError.

//! Harvester - walks a client-rendered component catalog and collects
//! deduplicated records.
//!
//! The driver talks to the browser through the [`CatalogSession`] trait, so
//! the same traversal runs against headless Chrome or against saved pages.
//!
//! # Example
//!
//! ```no_run
//! use partlib_catalog::ComponentClass;
//! use partlib_harvest::{BrowserOptions, ChromeSession, HarvestError, Harvester};
//!
//! fn main() -> Result<(), HarvestError> {
//!     let session = ChromeSession::launch(&BrowserOptions::default())?;
//!     let mut harvester = Harvester::<ChromeSession>::builder()
//!         .class(ComponentClass::Capacitor)
//!         .build(session)?;
//!     let run = harvester.traverse("https://www.lcsc.com/brand-detail/fojan.html", Some(2))?;
//!     println!("{} records from {} pages", run.records.len(), run.pages);
//!     Ok(())
//! }
//! ```

pub mod driver;
pub mod error;
pub mod formats;
pub mod options;
pub mod session;

pub use crate::driver::{Harvester, PageFetch, StopReason, Traversal, TraversalState};
pub use crate::error::{ErrorCode, HarvestError};
pub use crate::formats::{save_all, Format, SaveOutcome};
pub use crate::options::{HarvesterBuilder, Options};
pub use crate::session::{
    BrowserOptions, CatalogSession, ChromeSession, NextControl, Readiness, SavedPages,
};
