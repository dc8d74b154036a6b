//! Comment removal for raw template text.
//!
//! Comments are removed in three passes, in this order:
//!
//! 1. block comments `/* ... */` (may span lines, no nesting: the first `*/`
//!    closes the comment, an unclosed `/*` is kept as text)
//! 2. line comments, from `//` to the end of the line
//! 3. lines whose first non-space character is `#`, including their line break
//!
//! The result of [`strip_comments`] is a fixed point: stripping it again
//! returns the same text.

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";
const LINE_COMMENT: &str = "//";

/// Removes all comments from `text`.
#[must_use]
pub fn strip_comments(text: &str) -> String {
    let without_blocks = strip_block_comments(text);
    let without_lines = strip_line_comments(&without_blocks);
    strip_hash_lines(&without_lines)
}

/// Removes `/* ... */` regions.
///
/// Removing a region can join a `/` and a `*` into a new opener, so the
/// pass repeats until nothing changes.
#[must_use]
pub fn strip_block_comments(text: &str) -> String {
    let mut current = strip_block_comments_once(text);
    loop {
        let next = strip_block_comments_once(&current);
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn strip_block_comments_once(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(BLOCK_OPEN) {
        let body_start = open + BLOCK_OPEN.len();
        let Some(close) = rest[body_start..].find(BLOCK_CLOSE) else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[body_start + close + BLOCK_CLOSE.len()..];
    }

    out.push_str(rest);
    out
}

/// Truncates every line at its first `//`.
#[must_use]
pub fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (content, ending) = split_line_ending(line);
        match content.find(LINE_COMMENT) {
            Some(idx) => out.push_str(&content[..idx]),
            None => out.push_str(content),
        }
        out.push_str(ending);
    }
    out
}

/// Drops every line whose first non-space character is `#`.
#[must_use]
pub fn strip_hash_lines(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !split_line_ending(line).0.trim_start().starts_with('#'))
        .collect()
}

fn split_line_ending(line: &str) -> (&str, &str) {
    let content = match line.strip_suffix('\n') {
        Some(stripped) => stripped.strip_suffix('\r').unwrap_or(stripped),
        None => line,
    };
    (content, &line[content.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_comment_spans_lines() {
        assert_eq!(strip_block_comments("a /* x\ny */b"), "a b");
    }

    #[test]
    fn first_close_ends_block() {
        assert_eq!(strip_block_comments("/* a /* b */ c */"), " c */");
    }

    #[test]
    fn unclosed_block_is_kept() {
        assert_eq!(strip_block_comments("a /* b"), "a /* b");
    }

    #[test]
    fn exposed_block_is_removed() {
        // Removing the first comment joins `/` and `*` into a new opener.
        assert_eq!(strip_block_comments("//*x*/* z */"), "");
    }

    #[test]
    fn line_comment_keeps_line_break() {
        assert_eq!(strip_line_comments("a // b\r\nc"), "a \r\nc");
    }

    #[test]
    fn hash_lines_are_removed_with_break() {
        assert_eq!(strip_hash_lines("a\n  # b\nc"), "a\nc");
        assert_eq!(strip_hash_lines("a #b"), "a #b");
    }
}
