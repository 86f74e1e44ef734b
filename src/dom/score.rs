//! Heuristic confidence scoring of DOM elements for login roles.
//!
//! Scores are unbounded integers; `-1` marks an element disqualified by the
//! visibility gate, which is distinct from an eligible-but-weak score of `0`.
//! The weights below are fixed; changing them changes which element wins on
//! real pages, so treat the induced ranking as part of the contract.

use crate::dom::driver::PageDriver;
use crate::dom::hints::{contains_any, LOGIN_TEXT_HINTS, PASSWORD_HINTS, USERNAME_HINTS};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Disqualified by the visibility gate
pub const DISQUALIFIED: i64 = -1;

/// The functional purpose an element is being evaluated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Username,
    Password,
    SubmitButton,
}

/// Score an element for a role. The visibility gate runs first: a hidden or
/// zero-area element scores [`DISQUALIFIED`] regardless of its attributes.
pub fn score<P: PageDriver>(page: &P, el: &P::Handle, role: Role) -> Result<i64> {
    if !page.is_visible(el)? {
        return Ok(DISQUALIFIED);
    }

    match role {
        Role::Username => score_username(page, el),
        Role::Password => score_password(page, el),
        Role::SubmitButton => score_submit(page, el),
    }
}

/// Attribute sources consulted for hint matching, plus the resolved label
fn hint_sources<P: PageDriver>(page: &P, el: &P::Handle) -> Result<Vec<String>> {
    let mut sources = Vec::with_capacity(5);
    for attr in ["placeholder", "name", "id", "class"] {
        sources.push(page.attribute(el, attr)?.unwrap_or_default());
    }
    sources.push(resolve_label(page, el)?);
    Ok(sources)
}

fn score_username<P: PageDriver>(page: &P, el: &P::Handle) -> Result<i64> {
    let input_type = page.attribute(el, "type")?.unwrap_or_default().to_lowercase();
    let mut score = 0;

    if input_type == "text" || input_type == "email" {
        score += 3;
    }
    if input_type == "email" {
        score += 4;
    }

    for source in hint_sources(page, el)? {
        if contains_any(&source, USERNAME_HINTS) {
            score += 3;
        }
    }

    let placeholder = page.attribute(el, "placeholder")?.unwrap_or_default();
    if placeholder.trim().len() >= 3 {
        score += 1;
    }

    Ok(score)
}

fn score_password<P: PageDriver>(page: &P, el: &P::Handle) -> Result<i64> {
    let input_type = page.attribute(el, "type")?.unwrap_or_default().to_lowercase();
    let mut score = 0;

    if input_type == "password" {
        score += 6;
    }

    for source in hint_sources(page, el)? {
        if contains_any(&source, PASSWORD_HINTS) {
            score += 3;
        }
    }

    // PIN-style fields are occasionally plain text or tel inputs
    if input_type == "text" || input_type == "tel" {
        score += 1;
    }

    Ok(score)
}

fn score_submit<P: PageDriver>(page: &P, el: &P::Handle) -> Result<i64> {
    let tag = page.tag_name(el)?;
    let mut score = 0;

    if tag == "button" || tag == "input" {
        score += 1;
    }

    let mut combined = page.inner_text(el)?;
    for attr in ["value", "aria-label", "name", "role"] {
        if let Some(value) = page.attribute(el, attr)? {
            combined.push(' ');
            combined.push_str(&value);
        }
    }
    if contains_any(&combined, LOGIN_TEXT_HINTS) {
        score += 5;
    }

    if page.is_submit(el)? {
        score += 3;
    }

    Ok(score)
}

/// Resolve an element's human-readable label: an associated `label[for]`
/// element, then an `aria-labelledby` reference, then the surrounding
/// container text truncated to 200 characters. Empty when nothing applies.
pub fn resolve_label<P: PageDriver>(page: &P, el: &P::Handle) -> Result<String> {
    if let Some(id) = page.attribute(el, "id")? {
        if let Some(label) = page.query_single(&format!("label[for='{}']", id))? {
            let text = page.inner_text(&label)?.trim().to_string();
            if !text.is_empty() {
                return Ok(text);
            }
        }
    }

    if let Some(labelled_by) = page.attribute(el, "aria-labelledby")? {
        if let Some(label) = page.query_single(&format!("#{}", labelled_by))? {
            let text = page.inner_text(&label)?.trim().to_string();
            if !text.is_empty() {
                return Ok(text);
            }
        }
    }

    Ok(page.container_text(el)?.chars().take(200).collect())
}
