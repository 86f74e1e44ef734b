//! Fixed hint-token vocabularies for role scoring.

/// Tokens suggesting a username/identifier input
pub const USERNAME_HINTS: &[&str] =
    &["user", "username", "email", "e-mail", "mail", "login", "id", "account", "mobile", "phone"];

/// Tokens suggesting a password/secret input
pub const PASSWORD_HINTS: &[&str] = &["pass", "passwd", "password", "pwd", "secret", "pin"];

/// Phrases suggesting a login/submit control
pub const LOGIN_TEXT_HINTS: &[&str] = &["login", "log in", "sign in", "signin", "submit", "continue", "next"];

/// Case-insensitive substring check against any hint in the set
pub fn contains_any(text: &str, hints: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    hints.iter().any(|h| lowered.contains(h))
}
