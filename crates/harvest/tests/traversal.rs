// ABOUTME: Integration tests for the pagination driver against scripted and saved sessions.
// ABOUTME: Covers every stop condition, cross-page dedup and environment error propagation.

use std::time::Duration;

use partlib_harvest::{
    CatalogSession, HarvestError, HarvesterBuilder, NextControl, Readiness, SavedPages,
    StopReason,
};
use pretty_assertions::assert_eq;

struct FakePage {
    html: String,
    renders: bool,
    next: NextControl,
}

#[derive(Default)]
struct ScriptedSession {
    pages: Vec<FakePage>,
    current: usize,
    broken_at: Option<usize>,
    calls: Vec<String>,
}

impl ScriptedSession {
    fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == call).count()
    }
}

impl CatalogSession for ScriptedSession {
    fn open(&mut self, _url: &str) -> Result<(), HarvestError> {
        self.calls.push("open".into());
        self.current = 0;
        Ok(())
    }

    fn wait_for(&mut self, _selector: &str, _timeout: Duration) -> Result<Readiness, HarvestError> {
        self.calls.push("wait".into());
        Ok(match self.pages.get(self.current) {
            Some(p) if p.renders => Readiness::Ready,
            _ => Readiness::TimedOut,
        })
    }

    fn content(&mut self) -> Result<String, HarvestError> {
        self.calls.push("content".into());
        if self.broken_at == Some(self.current) {
            return Err(HarvestError::session(
                "fake",
                "read page source",
                Some(anyhow::anyhow!("target closed")),
            ));
        }
        Ok(self.pages[self.current].html.clone())
    }

    fn press_next(&mut self, _selector: &str) -> Result<NextControl, HarvestError> {
        self.calls.push("press".into());
        let next = self.pages[self.current].next;
        if next == NextControl::Pressed {
            self.current += 1;
        }
        Ok(next)
    }
}

fn row(mpn: &str, supplier: &str, desc: &str) -> String {
    format!(
        r#"<tr id="productId{s}">
<td><a class="link" href="/product-detail/{s}.html" title="{m}">{m}</a></td>
<td><a class="font-Bold-600 major--text" href="/product-detail/{s}.html">{s}</a></td>
<td><div class="ellipsis-6" title="{d}">{d}</div></td>
</tr>"#,
        m = mpn,
        s = supplier,
        d = desc
    )
}

fn page(rows: &[String], next: NextControl) -> FakePage {
    FakePage {
        html: format!(
            "<!DOCTYPE html><html><body><table><tbody>{}</tbody></table></body></html>",
            rows.concat()
        ),
        renders: true,
        next,
    }
}

fn cap(mpn: &str, supplier: &str) -> String {
    row(mpn, supplier, "50V 100nF X7R ±10% 0603")
}

fn builder() -> HarvesterBuilder {
    HarvesterBuilder::new()
        .without_pauses()
        .row_timeout(Duration::ZERO)
        .post_click_timeout(Duration::ZERO)
}

fn mpns(records: &[partlib_catalog::CatalogRecord]) -> Vec<&str> {
    records
        .iter()
        .map(|r| r.manufacturer_part_number.as_str())
        .collect()
}

#[test]
fn page_limit_stops_without_another_advance() {
    let mut session = ScriptedSession::new(vec![
        page(&[cap("A1", "C1")], NextControl::Pressed),
        page(&[cap("B1", "C2")], NextControl::Pressed),
        page(&[cap("C1", "C3")], NextControl::Disabled),
    ]);
    let run = builder()
        .build(&mut session)
        .unwrap()
        .traverse("https://catalog.test/list", Some(2))
        .unwrap();

    assert_eq!(run.stop, StopReason::PageLimit);
    assert_eq!(run.pages, 2);
    assert_eq!(mpns(&run.records), vec!["A1", "B1"]);
    assert_eq!(session.count("press"), 1);
    assert_eq!(session.current, 1);
}

#[test]
fn disabled_control_is_the_last_page() {
    let mut session = ScriptedSession::new(vec![
        page(&[cap("A1", "C1")], NextControl::Pressed),
        page(&[cap("B1", "C2")], NextControl::Disabled),
    ]);
    let run = builder()
        .build(&mut session)
        .unwrap()
        .traverse("https://catalog.test/list", None)
        .unwrap();

    assert_eq!(run.stop, StopReason::NextDisabled);
    assert!(run.stop.is_last_page());
    assert_eq!(run.pages, 2);
    assert_eq!(run.records.len(), 2);
}

#[test]
fn missing_control_is_the_last_page() {
    let mut session = ScriptedSession::new(vec![page(&[cap("A1", "C1")], NextControl::Missing)]);
    let run = builder()
        .build(&mut session)
        .unwrap()
        .traverse("https://catalog.test/list", None)
        .unwrap();

    assert_eq!(run.stop, StopReason::NextMissing);
    assert_eq!(run.pages, 1);
    assert_eq!(mpns(&run.records), vec!["A1"]);
}

#[test]
fn rows_missing_after_click_keeps_partial_results() {
    let mut blank = page(&[], NextControl::Disabled);
    blank.renders = false;
    let mut session = ScriptedSession::new(vec![
        page(&[cap("A1", "C1"), cap("A2", "C2")], NextControl::Pressed),
        blank,
    ]);
    let run = builder()
        .build(&mut session)
        .unwrap()
        .traverse("https://catalog.test/list", None)
        .unwrap();

    assert_eq!(run.stop, StopReason::NextDidNotLoad);
    assert_eq!(run.pages, 1);
    assert_eq!(mpns(&run.records), vec!["A1", "A2"]);
    // No retry: one press, then give up.
    assert_eq!(session.count("press"), 1);
}

#[test]
fn first_page_that_never_renders_yields_empty_run() {
    let mut first = page(&[cap("A1", "C1")], NextControl::Pressed);
    first.renders = false;
    let mut session = ScriptedSession::new(vec![first]);
    let run = builder()
        .build(&mut session)
        .unwrap()
        .traverse("https://catalog.test/list", Some(5))
        .unwrap();

    assert_eq!(run.stop, StopReason::RenderTimeout);
    assert_eq!(run.pages, 0);
    assert!(run.records.is_empty());
    assert_eq!(session.count("content"), 0);
}

#[test]
fn duplicates_across_pages_keep_first_occurrence() {
    let mut session = ScriptedSession::new(vec![
        page(&[cap("A1", "C1"), cap("A2", "C2")], NextControl::Pressed),
        page(
            &[row("A1", "C9", "16V 1uF X5R ±20% 0402"), cap("B1", "C3")],
            NextControl::Disabled,
        ),
    ]);
    let run = builder()
        .build(&mut session)
        .unwrap()
        .traverse("https://catalog.test/list", None)
        .unwrap();

    assert_eq!(mpns(&run.records), vec!["A1", "A2", "B1"]);
    assert_eq!(run.duplicates, 1);
    let a1 = &run.records[0];
    assert_eq!(a1.supplier_part_number.as_deref(), Some("C1"));
    assert_eq!(a1.capacitance.as_deref(), Some("100NF"));
}

#[test]
fn broken_session_propagates() {
    let mut session = ScriptedSession::new(vec![
        page(&[cap("A1", "C1")], NextControl::Pressed),
        page(&[cap("B1", "C2")], NextControl::Disabled),
    ]);
    session.broken_at = Some(1);
    let err = builder()
        .build(&mut session)
        .unwrap()
        .traverse("https://catalog.test/list", None)
        .unwrap_err();

    assert!(err.is_session());
}

#[test]
fn unopenable_start_propagates() {
    let err = builder()
        .build(SavedPages::default())
        .unwrap()
        .traverse("saved pages", None)
        .unwrap_err();
    assert!(err.is_navigate());
}

#[test]
fn saved_fixture_pages_replay_end_to_end() {
    let dir = format!("{}/../catalog/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let session = SavedPages::from_files(&[
        format!("{}/capacitors_page1.html", dir),
        format!("{}/capacitors_page2.html", dir),
    ])
    .unwrap();
    let run = builder()
        .build(session)
        .unwrap()
        .traverse("saved pages", None)
        .unwrap();

    assert_eq!(run.stop, StopReason::NextDisabled);
    assert_eq!(run.pages, 2);
    assert_eq!(run.records.len(), 5);
    assert_eq!(run.duplicates, 1);
    assert_eq!(run.dropped, 1);
    assert_eq!(run.skipped_markers, 1);
}
