//! Replayable selector synthesis.
//!
//! The ladder prefers stable identifying attributes and always terminates:
//! `id` → `name` → `data-test` → `aria-label` → `placeholder` →
//! `tag:nth-of-type(n)`. Attribute text used in substring selectors is
//! truncated to 20 characters so minor copy edits don't break replay.

use crate::dom::driver::PageDriver;
use crate::error::Result;

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Build a selector guaranteed to resolve to at least `el` when re-queried
/// against the same page state.
pub fn synthesize<P: PageDriver>(page: &P, el: &P::Handle) -> Result<String> {
    let tag = page.tag_name(el)?;

    if let Some(id) = page.attribute(el, "id")? {
        if !id.is_empty() {
            return Ok(format!("#{}", id));
        }
    }

    if let Some(name) = page.attribute(el, "name")? {
        if !name.is_empty() {
            return Ok(format!("{}[name='{}']", tag, name));
        }
    }

    if let Some(data_test) = page.attribute(el, "data-test")? {
        if !data_test.is_empty() {
            return Ok(format!("{}[data-test='{}']", tag, data_test));
        }
    }

    if let Some(aria) = page.attribute(el, "aria-label")? {
        if !aria.is_empty() {
            return Ok(format!("{}[aria-label*='{}']", tag, truncate(&aria, 20)));
        }
    }

    if let Some(placeholder) = page.attribute(el, "placeholder")? {
        if !placeholder.is_empty() {
            return Ok(format!("{}[placeholder*='{}']", tag, truncate(&placeholder, 20)));
        }
    }

    let ordinal = page.sibling_ordinal(el)?;
    Ok(format!("{}:nth-of-type({})", tag, ordinal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::testutil::{FakeElement, FakePage};

    fn synthesize_one(el: FakeElement) -> String {
        let page = FakePage::new(vec![el]);
        synthesize(&page, &0).unwrap()
    }

    #[test]
    fn test_id_wins_over_name() {
        let sel = synthesize_one(FakeElement::new("input").attr("id", "em").attr("name", "email"));
        assert_eq!(sel, "#em");
    }

    #[test]
    fn test_name_is_tag_qualified() {
        let sel = synthesize_one(FakeElement::new("input").attr("name", "pwd"));
        assert_eq!(sel, "input[name='pwd']");
    }

    #[test]
    fn test_data_test_before_aria_label() {
        let sel = synthesize_one(
            FakeElement::new("button").attr("data-test", "login-btn").attr("aria-label", "Log in"),
        );
        assert_eq!(sel, "button[data-test='login-btn']");
    }

    #[test]
    fn test_aria_label_is_truncated_and_substring_matched() {
        let sel = synthesize_one(
            FakeElement::new("input").attr("aria-label", "Enter your email address to sign in"),
        );
        assert_eq!(sel, "input[aria-label*='Enter your email add']");
    }

    #[test]
    fn test_placeholder_fallback() {
        let sel = synthesize_one(FakeElement::new("input").attr("placeholder", "Email"));
        assert_eq!(sel, "input[placeholder*='Email']");
    }

    #[test]
    fn test_positional_fallback() {
        let sel = synthesize_one(FakeElement::new("button").ordinal(3));
        assert_eq!(sel, "button:nth-of-type(3)");
    }

    #[test]
    fn test_empty_attributes_are_skipped() {
        let sel = synthesize_one(FakeElement::new("input").attr("id", "").attr("name", "q"));
        assert_eq!(sel, "input[name='q']");
    }
}
