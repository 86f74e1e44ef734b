//! Instruction-to-value extraction.
//!
//! Parses a free-text prompt like `go to https://example.com and login with
//! "alice@co.com" and password "p@ss1"` into a URL and credential pair.
//! Extraction is strict: credential values must be quoted. Bare words after a
//! keyword ("use password hunter2") are deliberately not extracted; the
//! false-positive rate on ordinary sentences is too high. Identical input
//! always yields identical output.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Entities recovered from a prompt; every field is optional and absence is a
/// valid outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedIntent {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

// URL: stop at whitespace, quotes, comma, or ')'
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s'",)]+"#).unwrap());

// Keyword families, longest alternatives first so e.g. "login id" is not
// eaten by "login". Plain "user" is excluded: it matches narration like
// "user navigates to ...".
static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:username|user name|e-mail|email|login id|login)\b[^'"]{0,40}?['"]([^'"]+)['"]"#)
        .unwrap()
});

static PASSWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:password|passwd|pass|pwd|secret|pin)\b[^'"]{0,40}?['"]([^'"]+)['"]"#).unwrap()
});

/// Extract URL and credentials from a prompt.
///
/// The URL (first match by position) is removed from the text before
/// credential matching so path or query fragments are never mistaken for
/// values. Each credential is the first quoted literal following one of its
/// family's keywords within a short window.
pub fn extract(prompt: &str) -> ExtractedIntent {
    let prompt = prompt.trim();

    let url = URL_RE.find(prompt).map(|m| m.as_str().to_string());

    let without_url = match &url {
        Some(u) => prompt.replacen(u.as_str(), " ", 1),
        None => prompt.to_string(),
    };
    let text = without_url.split_whitespace().collect::<Vec<_>>().join(" ");

    ExtractedIntent {
        url,
        username: first_quoted_value(&USERNAME_RE, &text),
        password: first_quoted_value(&PASSWORD_RE, &text),
    }
}

fn first_quoted_value(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].trim().to_string())
}

/// Prefix a scheme onto scheme-less URLs so navigation always has one.
/// Localhost targets default to plain http.
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();

    if trimmed.contains("://") || trimmed.starts_with("about:") || trimmed.starts_with("data:") {
        return trimmed.to_string();
    }

    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
        return format!("http://{}", trimmed);
    }

    format!("https://{}", trimmed)
}
