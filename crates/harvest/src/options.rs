// ABOUTME: Configuration options for the harvester including Options and HarvesterBuilder.
// ABOUTME: HarvesterBuilder provides a fluent API for constructing Harvester instances over any session.

use std::time::Duration;

use partlib_catalog::{load_builtin_layout, CatalogLayout, ComponentClass, RowExtractor};

use crate::driver::Harvester;
use crate::error::HarvestError;
use crate::session::CatalogSession;

/// Timing and layout configuration for one traversal.
#[derive(Debug, Clone)]
pub struct Options {
    pub layout: CatalogLayout,
    /// Pause after opening the start URL.
    pub initial_settle: Duration,
    /// Bound on waiting for rows of the current page.
    pub row_timeout: Duration,
    /// Pause after pressing the next-page control.
    pub post_click_settle: Duration,
    /// Bound on waiting for rows after pressing the next-page control.
    pub post_click_timeout: Duration,
    /// Lower bound of the randomized delay between pages.
    pub min_delay: Duration,
    /// Upper bound of the randomized delay between pages.
    pub max_delay: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            layout: load_builtin_layout(ComponentClass::default()),
            initial_settle: Duration::from_secs(3),
            row_timeout: Duration::from_secs(15),
            post_click_settle: Duration::from_secs(2),
            post_click_timeout: Duration::from_secs(10),
            min_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(4),
        }
    }
}

/// Builder for constructing Harvester instances with custom configuration.
#[derive(Debug, Clone)]
pub struct HarvesterBuilder {
    opts: Options,
}

impl HarvesterBuilder {
    /// Create a new HarvesterBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Use the built-in layout for `class`.
    pub fn class(mut self, class: ComponentClass) -> Self {
        self.opts.layout = load_builtin_layout(class);
        self
    }

    /// Use a custom catalog layout.
    pub fn layout(mut self, layout: CatalogLayout) -> Self {
        self.opts.layout = layout;
        self
    }

    /// Set the pause after opening the start URL.
    pub fn initial_settle(mut self, settle: Duration) -> Self {
        self.opts.initial_settle = settle;
        self
    }

    /// Set the bound on waiting for the first page's rows.
    pub fn row_timeout(mut self, timeout: Duration) -> Self {
        self.opts.row_timeout = timeout;
        self
    }

    /// Set the pause after pressing the next-page control.
    pub fn post_click_settle(mut self, settle: Duration) -> Self {
        self.opts.post_click_settle = settle;
        self
    }

    /// Set the bound on waiting for rows after a page advance.
    pub fn post_click_timeout(mut self, timeout: Duration) -> Self {
        self.opts.post_click_timeout = timeout;
        self
    }

    /// Set the range of the randomized delay between pages.
    pub fn delay_range(mut self, min: Duration, max: Duration) -> Self {
        self.opts.min_delay = min;
        self.opts.max_delay = max.max(min);
        self
    }

    /// Zero every settle pause and inter-page delay. Wait bounds are kept.
    pub fn without_pauses(mut self) -> Self {
        self.opts.initial_settle = Duration::ZERO;
        self.opts.post_click_settle = Duration::ZERO;
        self.opts.min_delay = Duration::ZERO;
        self.opts.max_delay = Duration::ZERO;
        self
    }

    /// Options accumulated so far.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Build the Harvester over `session`, compiling the layout's selectors.
    pub fn build<S: CatalogSession>(self, session: S) -> Result<Harvester<S>, HarvestError> {
        let extractor = RowExtractor::new(self.opts.layout.clone())?;
        Ok(Harvester::new(session, extractor, self.opts))
    }
}

impl Default for HarvesterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
