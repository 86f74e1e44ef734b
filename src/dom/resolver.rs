//! Page-wide login-control discovery.
//!
//! Scans input-like and button-like elements, scores each candidate per role,
//! and keeps the running best with a `>=` comparison: among equally scored
//! candidates the one encountered latest in document order wins. That
//! tie-break is intentional and load-bearing on pages with several plausible
//! inputs. Roles that end the scan unassigned fall back to a broad structural
//! query whose first hit is accepted unscored.

use crate::dom::driver::PageDriver;
use crate::dom::score::{score, Role};
use crate::dom::selector::synthesize;
use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const INPUT_SCAN: &str = "input, textarea";
const BUTTON_SCAN: &str = "button, input[type='submit'], [role='button'], a";
const USERNAME_FALLBACK: &str = "input[type='email'], input[type='text']";
const PASSWORD_FALLBACK: &str = "input[type='password']";
const BUTTON_FALLBACK: &str = "button, input[type='submit']";

/// How a role's selector was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Won the scored scan
    Scored,
    /// Accepted unscored from the structural fallback query
    Fallback,
}

/// Best selector found for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoleMatch {
    /// Replayable selector, `None` when no element was found at all
    pub selector: Option<String>,
    /// Last score for the role; `-1` when never assigned
    pub score: i64,
    /// Scan outcome provenance
    pub via: ResolutionSource,
}

impl RoleMatch {
    fn absent() -> Self {
        Self { selector: None, score: -1, via: ResolutionSource::Scored }
    }
}

/// The resolver's output contract: one match per role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DiscoveredSelectors {
    pub username: RoleMatch,
    pub password: RoleMatch,
    pub button: RoleMatch,
}

/// Running best over one scan; candidates are tracked by scan index
struct Best {
    index: Option<usize>,
    score: i64,
}

impl Best {
    fn new() -> Self {
        Self { index: None, score: -1 }
    }

    /// Disqualified (`-1`) candidates never assign; eligible ones replace the
    /// running best on ties, so the latest equal scorer wins.
    fn offer(&mut self, index: usize, score: i64) {
        if score >= 0 && score >= self.score {
            self.score = score;
            self.index = Some(index);
        }
    }
}

fn finish<P: PageDriver>(
    page: &P,
    elements: &[P::Handle],
    best: Best,
    fallback_query: &str,
) -> Result<RoleMatch> {
    if let Some(index) = best.index {
        return Ok(RoleMatch {
            selector: Some(synthesize(page, &elements[index])?),
            score: best.score,
            via: ResolutionSource::Scored,
        });
    }

    // Scoring found nothing eligible; accept the first structural hit unscored
    if let Some(el) = page.query_single(fallback_query)? {
        log::debug!("falling back to structural query '{}'", fallback_query);
        return Ok(RoleMatch {
            selector: Some(synthesize(page, &el)?),
            score: 0,
            via: ResolutionSource::Fallback,
        });
    }

    Ok(RoleMatch::absent())
}

/// Locate the best username input, password input, and submit control on the
/// current page. Deterministic for a static page: resolving twice yields
/// identical output.
pub fn resolve_login<P: PageDriver>(page: &P) -> Result<DiscoveredSelectors> {
    let inputs = page.query_all(INPUT_SCAN)?;
    let mut best_username = Best::new();
    let mut best_password = Best::new();

    for (i, el) in inputs.iter().enumerate() {
        let username_score = score(page, el, Role::Username)?;
        let password_score = score(page, el, Role::Password)?;
        best_username.offer(i, username_score);
        best_password.offer(i, password_score);
    }

    let buttons = page.query_all(BUTTON_SCAN)?;
    let mut best_button = Best::new();

    for (i, el) in buttons.iter().enumerate() {
        best_button.offer(i, score(page, el, Role::SubmitButton)?);
    }

    Ok(DiscoveredSelectors {
        username: finish(page, &inputs, best_username, USERNAME_FALLBACK)?,
        password: finish(page, &inputs, best_password, PASSWORD_FALLBACK)?,
        button: finish(page, &buttons, best_button, BUTTON_FALLBACK)?,
    })
}
