//! In-memory [`PageDriver`] used by the resolver unit tests.

use crate::dom::driver::PageDriver;
use crate::error::Result;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct FakeElement {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub text: String,
    pub visible: bool,
    pub ordinal: u32,
    pub container_text: String,
}

impl FakeElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: HashMap::new(),
            text: String::new(),
            visible: true,
            ordinal: 1,
            container_text: String::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn ordinal(mut self, n: u32) -> Self {
        self.ordinal = n;
        self
    }

    pub fn container_text(mut self, text: &str) -> Self {
        self.container_text = text.to_string();
        self
    }
}

/// A static page; handles are indices into the element list, so document
/// order is the insertion order.
pub struct FakePage {
    pub elements: Vec<FakeElement>,
}

impl FakePage {
    pub fn new(elements: Vec<FakeElement>) -> Self {
        Self { elements }
    }

    fn el(&self, idx: &usize) -> &FakeElement {
        &self.elements[*idx]
    }

    /// Match one comma-free selector part: `tag`, `#id`, `[attr='v']`,
    /// `tag[attr='v']`, or `label[for='x']`. Enough surface for the selectors
    /// the resolver issues.
    fn matches(el: &FakeElement, part: &str) -> bool {
        let part = part.trim();
        if let Some(id) = part.strip_prefix('#') {
            return el.attrs.get("id").map(String::as_str) == Some(id);
        }

        let (tag, rest) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };

        if !tag.is_empty() && el.tag != tag {
            return false;
        }

        let mut rest = rest;
        while let Some(stripped) = rest.strip_prefix('[') {
            let end = match stripped.find(']') {
                Some(e) => e,
                None => return false,
            };
            let clause = &stripped[..end];
            match clause.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim_matches('\'').trim_matches('"');
                    if el.attrs.get(name).map(String::as_str) != Some(value) {
                        return false;
                    }
                }
                None => {
                    if !el.attrs.contains_key(clause) {
                        return false;
                    }
                }
            }
            rest = &stripped[end + 1..];
        }

        true
    }
}

impl PageDriver for FakePage {
    type Handle = usize;

    fn query_all(&self, selector: &str) -> Result<Vec<usize>> {
        let parts: Vec<&str> = selector.split(',').collect();
        Ok((0..self.elements.len())
            .filter(|i| parts.iter().any(|p| Self::matches(&self.elements[*i], p)))
            .collect())
    }

    fn query_single(&self, selector: &str) -> Result<Option<usize>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    fn attribute(&self, el: &usize, name: &str) -> Result<Option<String>> {
        Ok(self.el(el).attrs.get(name).cloned())
    }

    fn inner_text(&self, el: &usize) -> Result<String> {
        Ok(self.el(el).text.clone())
    }

    fn tag_name(&self, el: &usize) -> Result<String> {
        Ok(self.el(el).tag.clone())
    }

    fn is_visible(&self, el: &usize) -> Result<bool> {
        Ok(self.el(el).visible)
    }

    fn sibling_ordinal(&self, el: &usize) -> Result<u32> {
        Ok(self.el(el).ordinal)
    }

    fn is_submit(&self, el: &usize) -> Result<bool> {
        let e = self.el(el);
        let ty = e.attrs.get("type").map(String::as_str).unwrap_or("");
        Ok(ty.eq_ignore_ascii_case("submit") || (e.tag == "button" && ty.is_empty()))
    }

    fn container_text(&self, el: &usize) -> Result<String> {
        Ok(self.el(el).container_text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_page_selector_matching() {
        let page = FakePage::new(vec![
            FakeElement::new("input").attr("type", "text").attr("id", "u"),
            FakeElement::new("input").attr("type", "password"),
            FakeElement::new("button").text("Go"),
        ]);

        assert_eq!(page.query_all("input, textarea").unwrap(), vec![0, 1]);
        assert_eq!(page.query_all("input[type='password']").unwrap(), vec![1]);
        assert_eq!(page.query_single("#u").unwrap(), Some(0));
        assert_eq!(page.query_single("button, input[type='submit']").unwrap(), Some(2));
        assert_eq!(page.query_single("textarea").unwrap(), None);
    }
}
