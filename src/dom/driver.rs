use crate::error::{FlowError, Result};
use headless_chrome::{Element, Tab};
use serde_json::Value;
use std::sync::Arc;

/// Read-only access to a live page, as needed by the login resolver.
///
/// The handle type is opaque to callers; handles are only valid for the scan
/// that produced them and must not be kept across navigations. Everything the
/// resolver derives from a handle (selector string, score) survives on its
/// own.
pub trait PageDriver {
    type Handle;

    /// All elements matching a CSS selector, in document order
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Handle>>;

    /// First element matching a CSS selector, if any
    fn query_single(&self, selector: &str) -> Result<Option<Self::Handle>>;

    /// Attribute value, `None` when the attribute is absent
    fn attribute(&self, el: &Self::Handle, name: &str) -> Result<Option<String>>;

    /// Rendered text content of the element
    fn inner_text(&self, el: &Self::Handle) -> Result<String>;

    /// Lower-cased tag name
    fn tag_name(&self, el: &Self::Handle) -> Result<String>;

    /// Whether the element has a rendered box and is not hidden via CSS
    fn is_visible(&self, el: &Self::Handle) -> Result<bool>;

    /// 1-based position among preceding same-tag siblings
    fn sibling_ordinal(&self, el: &Self::Handle) -> Result<u32>;

    /// Whether the element submits its form (explicit `type=submit` or a
    /// button's default submit behavior)
    fn is_submit(&self, el: &Self::Handle) -> Result<bool>;

    /// Text of the surrounding container, used as a last-resort label source
    fn container_text(&self, el: &Self::Handle) -> Result<String>;
}

const VISIBILITY_JS: &str = r#"
    function() {
        const s = window.getComputedStyle(this);
        const r = this.getBoundingClientRect();
        return s.display !== 'none' && s.visibility !== 'hidden' && r.width > 0 && r.height > 0;
    }
"#;

const ORDINAL_JS: &str = r#"
    function() {
        let i = 1, n = this;
        while ((n = n.previousElementSibling) !== null) {
            if (n.tagName === this.tagName) { i++; }
        }
        return i;
    }
"#;

const CONTAINER_TEXT_JS: &str = r#"
    function() {
        let t = "";
        if (this.parentElement) { t += this.parentElement.innerText || ""; }
        if (this.previousElementSibling) { t += " " + (this.previousElementSibling.innerText || ""); }
        return t.trim();
    }
"#;

/// [`PageDriver`] over a live Chrome tab, backed by in-page script probes.
pub struct CdpPage<'a> {
    tab: &'a Arc<Tab>,
}

impl<'a> CdpPage<'a> {
    pub fn new(tab: &'a Arc<Tab>) -> Self {
        Self { tab }
    }

    fn probe(&self, el: &Element<'a>, js_fn: &str) -> Result<Value> {
        let remote = el
            .call_js_fn(js_fn, vec![], false)
            .map_err(|e| FlowError::EvaluationFailed(e.to_string()))?;
        Ok(remote.value.unwrap_or(Value::Null))
    }
}

impl<'a> PageDriver for CdpPage<'a> {
    type Handle = Element<'a>;

    fn query_all(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        // An empty match set surfaces as an error in headless_chrome
        Ok(self.tab.find_elements(selector).unwrap_or_default())
    }

    fn query_single(&self, selector: &str) -> Result<Option<Element<'a>>> {
        Ok(self.tab.find_element(selector).ok())
    }

    fn attribute(&self, el: &Element<'a>, name: &str) -> Result<Option<String>> {
        let js = format!("function() {{ return this.getAttribute(\"{}\"); }}", name);
        match self.probe(el, &js)? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    fn inner_text(&self, el: &Element<'a>) -> Result<String> {
        let value = self.probe(el, "function() { return this.innerText || \"\"; }")?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn tag_name(&self, el: &Element<'a>) -> Result<String> {
        let value = self.probe(el, "function() { return this.tagName.toLowerCase(); }")?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    fn is_visible(&self, el: &Element<'a>) -> Result<bool> {
        Ok(self.probe(el, VISIBILITY_JS)?.as_bool().unwrap_or(false))
    }

    fn sibling_ordinal(&self, el: &Element<'a>) -> Result<u32> {
        Ok(self.probe(el, ORDINAL_JS)?.as_u64().unwrap_or(1) as u32)
    }

    fn is_submit(&self, el: &Element<'a>) -> Result<bool> {
        let value = self.probe(el, "function() { return (this.type || \"\").toLowerCase() === \"submit\"; }")?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn container_text(&self, el: &Element<'a>) -> Result<String> {
        let value = self.probe(el, CONTAINER_TEXT_JS)?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }
}
