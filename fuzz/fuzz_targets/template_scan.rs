#![no_main]

use libfuzzer_sys::fuzz_target;
use weave_fields::{declare, ReservedNames};
use weave_syntax::{lex, placeholders, split_template, strip_comments, toggle_tags};

const MAX_SOURCE_BYTES: usize = 4096;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fuzz_target!(|data: &[u8]| {
    let source = decode_source(data);

    let cleaned = strip_comments(&source);
    assert_eq!(strip_comments(&cleaned), cleaned, "comment stripping is not idempotent");

    let covered: usize = lex(&cleaned)
        .iter()
        .map(|token| usize::from(token.range.len()))
        .sum();
    assert_eq!(covered, cleaned.len(), "tokens do not cover the text");

    for placeholder in placeholders(&cleaned) {
        assert!(!placeholder.name.is_empty());
        assert_eq!(placeholder.name.trim(), placeholder.name.as_str());
    }
    for toggle in toggle_tags(&cleaned) {
        assert!(toggle.open.end() <= toggle.body.start());
        assert!(toggle.body.end() <= toggle.close.start());
    }

    let split = split_template(&cleaned);
    assert!(split.main.len() <= cleaned.len());

    let reserved = ReservedNames::default();
    for extra_active in [false, true] {
        let decls = declare(&source, extra_active, &reserved);
        let mut names: Vec<_> = decls.names().collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), decls.len(), "duplicate field names");
    }
});
