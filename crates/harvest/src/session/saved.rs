// ABOUTME: Offline catalog session that replays saved rendered pages in order.
// ABOUTME: Reads the next-page control state out of each saved page instead of clicking.

use std::fs;
use std::path::Path;
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};

use super::{CatalogSession, NextControl, Readiness};
use crate::error::HarvestError;

/// Saved rendered pages served as consecutive catalog pages.
#[derive(Debug, Clone, Default)]
pub struct SavedPages {
    pages: Vec<(String, String)>,
    current: Option<usize>,
}

impl SavedPages {
    /// Wraps in-memory pages; each entry is `(label, html)`.
    pub fn new(pages: Vec<(String, String)>) -> Self {
        Self {
            pages,
            current: None,
        }
    }

    /// Reads each file as one page, in the given order.
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, HarvestError> {
        let mut pages = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let label = path.display().to_string();
            let html = fs::read_to_string(path)
                .map_err(|e| HarvestError::navigate(&label, "read saved page", Some(e.into())))?;
            pages.push((label, html));
        }
        Ok(Self::new(pages))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn page(&self) -> Option<&(String, String)> {
        self.current.and_then(|i| self.pages.get(i))
    }

    fn label(&self) -> String {
        self.page().map(|(l, _)| l.clone()).unwrap_or_default()
    }

    fn compile(&self, selector: &str) -> Result<Selector, HarvestError> {
        Selector::parse(selector).map_err(|e| {
            HarvestError::session(
                self.label(),
                "compile selector",
                Some(anyhow::anyhow!("`{}`: {}", selector, e)),
            )
        })
    }
}

fn is_disabled(el: ElementRef<'_>) -> bool {
    let v = el.value();
    v.attr("disabled").is_some()
        || v.classes().any(|c| c == "disabled")
        || v.attr("aria-disabled") == Some("true")
}

impl CatalogSession for SavedPages {
    fn open(&mut self, url: &str) -> Result<(), HarvestError> {
        if self.pages.is_empty() {
            return Err(HarvestError::navigate(
                url,
                "open",
                Some(anyhow::anyhow!("no saved pages to replay")),
            ));
        }
        self.current = Some(0);
        Ok(())
    }

    fn wait_for(&mut self, selector: &str, _timeout: Duration) -> Result<Readiness, HarvestError> {
        let sel = self.compile(selector)?;
        let ready = self
            .page()
            .map(|(_, html)| Html::parse_document(html).select(&sel).next().is_some())
            .unwrap_or(false);
        Ok(if ready {
            Readiness::Ready
        } else {
            Readiness::TimedOut
        })
    }

    fn content(&mut self) -> Result<String, HarvestError> {
        self.page().map(|(_, html)| html.clone()).ok_or_else(|| {
            HarvestError::session("", "read page source", Some(anyhow::anyhow!("no page loaded")))
        })
    }

    fn press_next(&mut self, selector: &str) -> Result<NextControl, HarvestError> {
        let sel = self.compile(selector)?;
        let state = match self.page() {
            None => NextControl::Missing,
            Some((_, html)) => {
                let doc = Html::parse_document(html);
                match doc.select(&sel).next() {
                    None => NextControl::Missing,
                    Some(el) if is_disabled(el) => NextControl::Disabled,
                    Some(_) => NextControl::Pressed,
                }
            }
        };
        if state == NextControl::Pressed {
            // Past the last saved page nothing renders, as if the click went nowhere.
            self.current = self.current.map(|i| i + 1);
        }
        Ok(state)
    }
}
