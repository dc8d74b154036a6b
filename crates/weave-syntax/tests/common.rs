//! Shared helpers for scanner tests.
#![allow(dead_code)]

use weave_syntax::{placeholders, strip_comments, toggle_tags};

/// One line per placeholder: name, type, bounds and input flag.
pub fn describe_placeholders(source: &str) -> String {
    let cleaned = strip_comments(source);
    placeholders(&cleaned)
        .map(|p| {
            format!(
                "{} {} min={:?} max={:?} input={}",
                p.name, p.type_token, p.min_token, p.max_token, p.use_input
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per toggle pair: name, group and body text.
pub fn describe_toggles(source: &str) -> String {
    let cleaned = strip_comments(source);
    toggle_tags(&cleaned)
        .iter()
        .map(|t| {
            format!(
                "{} group={} body={:?}",
                t.name,
                t.group.as_deref().unwrap_or("-"),
                &cleaned[t.body]
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
