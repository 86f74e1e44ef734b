//! Prompt-to-flow compilation.
//!
//! Parses the prompt, scans the live page for login controls, and emits the
//! canonical flow: navigate → fill username → fill password → click submit →
//! wait → screenshot. The click step is only emitted when a submit control
//! was actually found; missing credentials are replaced by placeholder
//! literals so the flow stays replayable after manual editing.

use crate::browser::Session;
use crate::dom::{resolve_login, CdpPage, DiscoveredSelectors};
use crate::error::{FlowError, Result};
use crate::flow::step::{ActionStep, DEFAULT_WAIT_TIMEOUT_MS, PASSWORD_PLACEHOLDER, USERNAME_PLACEHOLDER};
use crate::intent::{extract, normalize_url, ExtractedIntent};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PAGE_SETTLE_TIMEOUT_MS: u64 = 8000;

/// Everything the compiler learned from one prompt and one page scan
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompiledFlow {
    pub prompt: String,
    pub parsed_entities: ExtractedIntent,
    pub discovered_selectors: DiscoveredSelectors,
    pub flow: Vec<ActionStep>,
}

/// Assemble the canonical step list from extracted entities and discovered
/// selectors. Pure; no browser involved.
pub fn build_flow(url: &str, intent: &ExtractedIntent, discovered: &DiscoveredSelectors) -> Vec<ActionStep> {
    let mut steps = vec![ActionStep::Navigate { url: url.to_string() }];

    steps.push(ActionStep::Fill {
        selector: discovered.username.selector.clone(),
        text: intent.username.clone().unwrap_or_else(|| USERNAME_PLACEHOLDER.to_string()),
    });
    steps.push(ActionStep::Fill {
        selector: discovered.password.selector.clone(),
        text: intent.password.clone().unwrap_or_else(|| PASSWORD_PLACEHOLDER.to_string()),
    });

    if let Some(selector) = &discovered.button.selector {
        steps.push(ActionStep::Click { selector: selector.clone() });
    }

    steps.push(ActionStep::WaitFor { selector: "body".to_string(), timeout_ms: DEFAULT_WAIT_TIMEOUT_MS });
    steps.push(ActionStep::Screenshot { selector: None, save: true });

    steps
}

/// Compile a prompt into a flow by scanning the page it points at.
///
/// The session is opened for the scan and closed again afterwards; running
/// the compiled flow re-opens it at the navigate step.
pub fn compile(session: &mut Session, prompt: &str, wait_selector: Option<&str>) -> Result<CompiledFlow> {
    let intent = extract(prompt);
    let url = match &intent.url {
        Some(url) => normalize_url(url),
        None => return Err(FlowError::NoUrlInPrompt),
    };

    session.navigate(&url)?;

    if let Some(selector) = wait_selector {
        let settled = session
            .page()?
            .wait_for_element_with_custom_timeout(selector, Duration::from_millis(PAGE_SETTLE_TIMEOUT_MS));
        if settled.is_err() {
            // scan anyway; the page may be usable without it
            log::debug!("wait selector '{}' did not settle, scanning anyway", selector);
        }
    }

    let discovered = {
        let page = CdpPage::new(session.page()?);
        resolve_login(&page)?
    };
    let flow = build_flow(&url, &intent, &discovered);

    session.close()?;

    Ok(CompiledFlow { prompt: prompt.to_string(), parsed_entities: intent, discovered_selectors: discovered, flow })
}
