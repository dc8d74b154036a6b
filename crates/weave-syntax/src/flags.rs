//! Boolean coercion for textual flag tokens.

/// Tokens that read as `true` (compared case-insensitively).
pub const TRUE_TOKENS: [&str; 7] = ["true", "yes", "on", "1", "+", "t", "check"];

/// Returns true if `token` (trimmed) is one of [`TRUE_TOKENS`], ignoring case.
///
/// Everything else, including the empty string, reads as `false`.
#[must_use]
pub fn parse_flag(token: &str) -> bool {
    let token = token.trim();
    TRUE_TOKENS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(token))
}
