//! Step execution against a live session.
//!
//! [`ActionRunner`] is the executor's only dependency, so flows can be
//! exercised in tests without a browser. [`SessionRunner`] is the real
//! implementation over a [`Session`]. Every action other than `navigate`
//! requires an open page; `navigate` opens the browser lazily.

use crate::browser::Session;
use crate::error::{FlowError, Result};
use crate::report::ReportConfig;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use serde_json::{json, Value};
use std::fs;
use std::time::Duration;
use uuid::Uuid;

/// The fixed action vocabulary, as seen by the executor
pub trait ActionRunner {
    fn navigate(&mut self, url: &str) -> Result<Value>;
    fn fill(&mut self, selector: Option<&str>, text: &str) -> Result<Value>;
    fn click(&mut self, selector: &str) -> Result<Value>;
    fn wait_for(&mut self, selector: &str, timeout_ms: u64) -> Result<Value>;
    fn screenshot(&mut self, selector: Option<&str>, save: bool) -> Result<Value>;
    fn close(&mut self) -> Result<Value>;
}

/// Runs actions against the single page of a [`Session`]
pub struct SessionRunner<'a> {
    session: &'a mut Session,
    config: &'a ReportConfig,
}

impl<'a> SessionRunner<'a> {
    pub fn new(session: &'a mut Session, config: &'a ReportConfig) -> Self {
        Self { session, config }
    }

    fn capture(&mut self, selector: Option<&str>) -> Result<Vec<u8>> {
        let tab = self.session.page()?;
        match selector {
            Some(selector) => {
                let element = tab
                    .find_element(selector)
                    .map_err(|_| FlowError::ElementNotFound(selector.to_string()))?;
                element
                    .capture_screenshot(CaptureScreenshotFormatOption::Png)
                    .map_err(|e| FlowError::ActionFailed { action: "screenshot".into(), reason: e.to_string() })
            }
            None => tab
                .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
                .map_err(|e| FlowError::ActionFailed { action: "screenshot".into(), reason: e.to_string() }),
        }
    }
}

impl ActionRunner for SessionRunner<'_> {
    fn navigate(&mut self, url: &str) -> Result<Value> {
        self.session.navigate(url)?;
        Ok(json!({"status": "navigated", "url": url}))
    }

    fn fill(&mut self, selector: Option<&str>, text: &str) -> Result<Value> {
        let selector = selector.ok_or_else(|| FlowError::ActionFailed {
            action: "fill".into(),
            reason: "no selector was discovered for this field".into(),
        })?;

        let tab = self.session.page()?;
        let element = tab
            .find_element(selector)
            .map_err(|_| FlowError::ElementNotFound(selector.to_string()))?;

        // Focus first; some pages ignore synthetic keystrokes otherwise
        let _ = element.click();
        element
            .type_into(text)
            .map_err(|e| FlowError::ActionFailed { action: "fill".into(), reason: e.to_string() })?;

        Ok(json!({"status": "filled", "selector": selector, "value": text}))
    }

    fn click(&mut self, selector: &str) -> Result<Value> {
        // Capture the page state right before the click, like a test artifact
        let screenshot = self.screenshot(None, true)?;

        let tab = self.session.page()?;
        let element = tab
            .find_element(selector)
            .map_err(|_| FlowError::ElementNotFound(selector.to_string()))?;
        element
            .click()
            .map_err(|e| FlowError::ActionFailed { action: "click".into(), reason: e.to_string() })?;

        Ok(json!({"status": "clicked", "selector": selector, "screenshot": screenshot}))
    }

    fn wait_for(&mut self, selector: &str, timeout_ms: u64) -> Result<Value> {
        let tab = self.session.page()?;
        tab.wait_for_element_with_custom_timeout(selector, Duration::from_millis(timeout_ms))
            .map_err(|_| FlowError::Timeout { selector: selector.to_string(), timeout_ms })?;

        Ok(json!({"status": "waited", "selector": selector, "timeout": timeout_ms}))
    }

    fn screenshot(&mut self, selector: Option<&str>, save: bool) -> Result<Value> {
        let png = self.capture(selector)?;

        if save {
            fs::create_dir_all(&self.config.screenshots_dir)?;
            let path = self
                .config
                .screenshots_dir
                .join(format!("screenshot_{}.png", Uuid::new_v4().simple()));
            fs::write(&path, &png)?;
            Ok(json!({"status": "screenshot_saved", "path": path.display().to_string()}))
        } else {
            Ok(json!({"status": "screenshot_inline", "data": BASE64.encode(&png)}))
        }
    }

    fn close(&mut self) -> Result<Value> {
        self.session.close()?;
        Ok(json!({"status": "browser_closed"}))
    }
}
