// ABOUTME: Headless Chrome implementation of the catalog session.
// ABOUTME: Drives one tab over the DevTools protocol and presses the next-page control via script.

use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::debug;
use url::Url;

use super::{CatalogSession, NextControl, Readiness};
use crate::error::HarvestError;

/// User agent sent unless the caller overrides it.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Launch settings for the browser process.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub headless: bool,
    pub window_size: (u32, u32),
    pub user_agent: Option<String>,
    /// How long the browser may sit idle before the protocol connection drops.
    pub idle_timeout: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: false,
            window_size: (1920, 1080),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            idle_timeout: Duration::from_secs(120),
        }
    }
}

/// A single Chrome tab owned for the length of one traversal.
pub struct ChromeSession {
    // Dropping the browser kills the process, so it lives as long as the tab.
    _browser: Browser,
    tab: Arc<Tab>,
    url: String,
}

impl ChromeSession {
    /// Starts Chrome and opens a blank tab.
    pub fn launch(opts: &BrowserOptions) -> Result<Self, HarvestError> {
        let launch = LaunchOptions::default_builder()
            .headless(opts.headless)
            .window_size(Some(opts.window_size))
            .idle_browser_timeout(opts.idle_timeout)
            .args(vec![OsStr::new("--disable-blink-features=AutomationControlled")])
            .build()
            .map_err(|e| {
                HarvestError::launch("configure browser", Some(anyhow::anyhow!("{}", e)))
            })?;

        let browser =
            Browser::new(launch).map_err(|e| HarvestError::launch("start browser", Some(e)))?;
        let tab = browser
            .new_tab()
            .map_err(|e| HarvestError::launch("open tab", Some(e)))?;

        if let Some(ref ua) = opts.user_agent {
            tab.set_user_agent(ua, None, None)
                .map_err(|e| HarvestError::launch("set user agent", Some(e)))?;
        }

        Ok(Self {
            _browser: browser,
            tab,
            url: String::new(),
        })
    }
}

impl CatalogSession for ChromeSession {
    fn open(&mut self, url: &str) -> Result<(), HarvestError> {
        let parsed = Url::parse(url)
            .map_err(|e| HarvestError::navigate(url, "open", Some(e.into())))?;
        if !matches!(parsed.scheme(), "http" | "https" | "file") {
            return Err(HarvestError::navigate(
                url,
                "open",
                Some(anyhow::anyhow!("unsupported scheme `{}`", parsed.scheme())),
            ));
        }
        self.url = url.to_string();
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| HarvestError::navigate(url, "open", Some(e)))?;
        Ok(())
    }

    fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<Readiness, HarvestError> {
        match self.tab.wait_for_element_with_custom_timeout(selector, timeout) {
            Ok(_) => Ok(Readiness::Ready),
            Err(e) if e.downcast_ref::<headless_chrome::util::Timeout>().is_some() => {
                debug!(selector, ?timeout, "wait for rows timed out");
                Ok(Readiness::TimedOut)
            }
            Err(e) => Err(HarvestError::session(&self.url, "wait for rows", Some(e))),
        }
    }

    fn content(&mut self) -> Result<String, HarvestError> {
        self.tab
            .get_content()
            .map_err(|e| HarvestError::session(&self.url, "read page source", Some(e)))
    }

    fn press_next(&mut self, selector: &str) -> Result<NextControl, HarvestError> {
        let script = next_control_script(selector).map_err(|e| {
            HarvestError::session(&self.url, "encode next selector", Some(e.into()))
        })?;
        let result = self
            .tab
            .evaluate(&script, false)
            .map_err(|e| HarvestError::session(&self.url, "press next page", Some(e)))?;

        let state = result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        match state {
            "missing" => Ok(NextControl::Missing),
            "disabled" => Ok(NextControl::Disabled),
            "pressed" => Ok(NextControl::Pressed),
            other => Err(HarvestError::session(
                &self.url,
                "press next page",
                Some(anyhow::anyhow!("unexpected control state `{}`", other)),
            )),
        }
    }
}

/// Script that inspects the next-page control and clicks it when enabled.
///
/// Evaluates to `"missing"`, `"disabled"` or `"pressed"`.
fn next_control_script(selector: &str) -> Result<String, serde_json::Error> {
    let quoted = serde_json::to_string(selector)?;
    Ok(format!(
        r#"(() => {{
    const el = document.querySelector({quoted});
    if (!el) return "missing";
    if (el.disabled || el.classList.contains("disabled") || el.getAttribute("aria-disabled") === "true") return "disabled";
    el.scrollIntoView({{ block: "center" }});
    el.click();
    return "pressed";
}})()"#
    ))
}
