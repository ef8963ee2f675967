// ABOUTME: Pagination driver that walks a client-rendered catalog one page at a time.
// ABOUTME: Threads an explicit TraversalState through each page step and reports why it stopped.

use std::fmt;
use std::thread;
use std::time::Duration;

use partlib_catalog::{CatalogRecord, ComponentClass, PageExtraction, RowExtractor, SeenSet};
use tracing::{debug, info, warn};

use crate::error::HarvestError;
use crate::options::{HarvesterBuilder, Options};
use crate::session::{CatalogSession, NextControl, Readiness};

/// Why a traversal ended. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured page cap was reached.
    PageLimit,
    /// Rows never appeared on the current page.
    RenderTimeout,
    /// The next-page control does not exist.
    NextMissing,
    /// The next-page control is disabled.
    NextDisabled,
    /// The control was pressed but no rows rendered afterwards.
    NextDidNotLoad,
}

impl StopReason {
    /// True when the catalog signalled its own end rather than the run giving up.
    pub fn is_last_page(self) -> bool {
        matches!(self, StopReason::NextMissing | StopReason::NextDisabled)
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StopReason::PageLimit => "page limit reached",
            StopReason::RenderTimeout => "rows did not render",
            StopReason::NextMissing => "no next-page control",
            StopReason::NextDisabled => "next-page control disabled",
            StopReason::NextDidNotLoad => "next page did not load",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of bringing a page into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFetch {
    Ready,
    End(StopReason),
}

/// Accumulator owned by one traversal call.
#[derive(Debug, Default)]
pub struct TraversalState {
    pub records: Vec<CatalogRecord>,
    pub seen: SeenSet,
    pub pages: usize,
    pub rows_seen: usize,
    pub duplicates: usize,
    pub dropped: usize,
    pub skipped_markers: usize,
}

impl TraversalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one page's extraction into the run totals.
    pub fn absorb(&mut self, page: PageExtraction) -> usize {
        let added = page.records.len();
        self.records.extend(page.records);
        self.pages += 1;
        self.rows_seen += page.rows;
        self.duplicates += page.duplicates;
        self.dropped += page.dropped;
        self.skipped_markers += page.skipped_markers;
        added
    }

    /// True once `max_pages` pages are in. `None` and `Some(0)` never limit.
    pub fn limit_reached(&self, max_pages: Option<usize>) -> bool {
        matches!(max_pages, Some(n) if n > 0 && self.pages >= n)
    }

    fn finish(self, stop: StopReason) -> Traversal {
        Traversal {
            records: self.records,
            pages: self.pages,
            stop,
            rows_seen: self.rows_seen,
            duplicates: self.duplicates,
            dropped: self.dropped,
            skipped_markers: self.skipped_markers,
        }
    }
}

/// Result of a completed traversal, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Traversal {
    pub records: Vec<CatalogRecord>,
    pub pages: usize,
    pub stop: StopReason,
    pub rows_seen: usize,
    pub duplicates: usize,
    pub dropped: usize,
    pub skipped_markers: usize,
}

/// Walks a paginated catalog through a [`CatalogSession`].
pub struct Harvester<S> {
    session: S,
    extractor: RowExtractor,
    opts: Options,
    rng: fastrand::Rng,
}

impl<S: CatalogSession> Harvester<S> {
    pub(crate) fn new(session: S, extractor: RowExtractor, opts: Options) -> Self {
        Self {
            session,
            extractor,
            opts,
            rng: fastrand::Rng::new(),
        }
    }

    /// Start configuring a Harvester.
    pub fn builder() -> HarvesterBuilder {
        HarvesterBuilder::new()
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn class(&self) -> ComponentClass {
        self.extractor.class()
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Releases the session, e.g. to reuse it for another traversal.
    pub fn into_session(self) -> S {
        self.session
    }

    /// Collects every new record from `start_url` onwards.
    ///
    /// Stops on the page cap, a missing or disabled next-page control, or
    /// rows that fail to render; records gathered so far are always
    /// returned. Only environment failures from the session are errors.
    pub fn traverse(
        &mut self,
        start_url: &str,
        max_pages: Option<usize>,
    ) -> Result<Traversal, HarvestError> {
        let mut state = TraversalState::new();

        info!(url = start_url, "opening catalog");
        self.session.open(start_url)?;
        pause(self.opts.initial_settle);

        let stop = loop {
            if let PageFetch::End(reason) = self.await_rows(self.opts.row_timeout)? {
                break reason;
            }
            self.extract_page(&mut state)?;

            if state.limit_reached(max_pages) {
                break StopReason::PageLimit;
            }
            if let PageFetch::End(reason) = self.advance()? {
                break reason;
            }
            self.pace();
        };

        match stop {
            StopReason::RenderTimeout | StopReason::NextDidNotLoad => {
                warn!(pages = state.pages, reason = %stop, "stopping early")
            }
            _ => debug!(reason = %stop, "traversal finished"),
        }
        info!(
            pages = state.pages,
            records = state.records.len(),
            duplicates = state.duplicates,
            dropped = state.dropped,
            reason = %stop,
            "harvest complete"
        );
        Ok(state.finish(stop))
    }

    fn await_rows(&mut self, timeout: Duration) -> Result<PageFetch, HarvestError> {
        let selector = &self.extractor.layout().row_selector;
        Ok(match self.session.wait_for(selector, timeout)? {
            Readiness::Ready => PageFetch::Ready,
            Readiness::TimedOut => PageFetch::End(StopReason::RenderTimeout),
        })
    }

    fn extract_page(&mut self, state: &mut TraversalState) -> Result<(), HarvestError> {
        let html = self.session.content()?;
        let page = self.extractor.extract_all(&html, &mut state.seen);
        let rows = page.rows;
        let added = state.absorb(page);
        info!(
            page = state.pages,
            rows,
            added,
            total = state.records.len(),
            "page extracted"
        );
        Ok(())
    }

    /// Presses the next-page control and waits for the new rows.
    fn advance(&mut self) -> Result<PageFetch, HarvestError> {
        let selector = &self.extractor.layout().next_page_selector;
        match self.session.press_next(selector)? {
            NextControl::Missing => Ok(PageFetch::End(StopReason::NextMissing)),
            NextControl::Disabled => Ok(PageFetch::End(StopReason::NextDisabled)),
            NextControl::Pressed => {
                pause(self.opts.post_click_settle);
                Ok(match self.await_rows(self.opts.post_click_timeout)? {
                    PageFetch::Ready => PageFetch::Ready,
                    PageFetch::End(_) => PageFetch::End(StopReason::NextDidNotLoad),
                })
            }
        }
    }

    fn pace(&mut self) {
        let delay = draw_delay(&mut self.rng, self.opts.min_delay, self.opts.max_delay);
        debug!(?delay, "waiting before next page");
        pause(delay);
    }
}

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}

/// Uniform delay in `[min, max]`, at millisecond resolution.
fn draw_delay(rng: &mut fastrand::Rng, min: Duration, max: Duration) -> Duration {
    let lo = min.as_millis() as u64;
    let hi = max.as_millis() as u64;
    if hi <= lo {
        return min;
    }
    Duration::from_millis(rng.u64(lo..=hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        let (min, max) = (Duration::from_secs(2), Duration::from_secs(4));
        for _ in 0..200 {
            let d = draw_delay(&mut rng, min, max);
            assert!(d >= min && d <= max, "{:?}", d);
        }
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut rng = fastrand::Rng::with_seed(1);
        let d = Duration::from_millis(250);
        assert_eq!(draw_delay(&mut rng, d, d), d);
        assert_eq!(draw_delay(&mut rng, Duration::ZERO, Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn limit_ignores_zero_and_none() {
        let mut state = TraversalState::new();
        state.pages = 3;
        assert!(!state.limit_reached(None));
        assert!(!state.limit_reached(Some(0)));
        assert!(state.limit_reached(Some(3)));
        assert!(!state.limit_reached(Some(4)));
    }

    #[test]
    fn absorb_accumulates_counters() {
        let mut state = TraversalState::new();
        let page = PageExtraction {
            records: vec![CatalogRecord::new("A").unwrap()],
            rows: 3,
            dropped: 1,
            duplicates: 1,
            skipped_markers: 2,
        };
        assert_eq!(state.absorb(page), 1);
        assert_eq!(state.pages, 1);
        assert_eq!(state.rows_seen, 3);
        assert_eq!(state.skipped_markers, 2);
    }

    #[test]
    fn only_control_states_count_as_last_page() {
        assert!(StopReason::NextDisabled.is_last_page());
        assert!(StopReason::NextMissing.is_last_page());
        assert!(!StopReason::NextDidNotLoad.is_last_page());
    }
}
