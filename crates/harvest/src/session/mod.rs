// ABOUTME: Browser session seam used by the pagination driver.
// ABOUTME: Defines the CatalogSession trait plus its readiness and next-control outcomes.

pub mod chrome;
pub mod saved;

use std::time::Duration;

use crate::error::HarvestError;

pub use chrome::{BrowserOptions, ChromeSession, DEFAULT_USER_AGENT};
pub use saved::SavedPages;

/// Outcome of a bounded wait for catalog rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    TimedOut,
}

/// State of the next-page control when the driver tried to press it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextControl {
    /// No element matched the control selector.
    Missing,
    /// The control exists but is disabled.
    Disabled,
    /// The control was scrolled into view and clicked.
    Pressed,
}

/// A rendered-browser session that can show one catalog page at a time.
///
/// Every method returns `Err` only for environment failures: a dead browser,
/// a start URL that cannot be opened, a script that cannot run. Catalog end
/// conditions come back as [`Readiness::TimedOut`] or a non-pressed
/// [`NextControl`].
pub trait CatalogSession {
    /// Navigate to `url` and wait for the navigation to commit.
    fn open(&mut self, url: &str) -> Result<(), HarvestError>;

    /// Block until `selector` matches or `timeout` elapses.
    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<Readiness, HarvestError>;

    /// The current rendered document source.
    fn content(&mut self) -> Result<String, HarvestError>;

    /// Press the next-page control matched by `selector`, if it is usable.
    fn press_next(&mut self, selector: &str) -> Result<NextControl, HarvestError>;
}

impl<S: CatalogSession + ?Sized> CatalogSession for &mut S {
    fn open(&mut self, url: &str) -> Result<(), HarvestError> {
        (**self).open(url)
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<Readiness, HarvestError> {
        (**self).wait_for(selector, timeout)
    }

    fn content(&mut self) -> Result<String, HarvestError> {
        (**self).content()
    }

    fn press_next(&mut self, selector: &str) -> Result<NextControl, HarvestError> {
        (**self).press_next(selector)
    }
}
