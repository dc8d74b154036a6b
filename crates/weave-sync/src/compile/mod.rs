//! Prompt compiler.
//!
//! Renders a template with the current cache values into the main prompt
//! and the extra output. The pipeline is:
//!
//! 1. strip comments, drop the vars block, split off the extra block
//! 2. keep or drop each toggle pair's body by the toggle's value
//! 3. replace placeholder tags with their values
//! 4. apply formatting directives

mod directives;

pub use directives::{apply_directives, Directive};

use weave_syntax::{lex, split_template, strip_comments, toggle_tags, TokenKind};

use crate::cache::CacheStore;
use crate::settings::SyncSettings;

/// Output of [`compile`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledPrompt {
    /// The rendered main prompt; empty when the prompt flag is off.
    pub prompt: String,
    /// The rendered extra block; empty when absent or inactive.
    pub extra: String,
}

/// Renders `template` with the values in `cache`.
///
/// The main prompt is produced unless the prompt flag is set false. The
/// extra output needs both an extra block and the extra flag set true.
#[must_use]
pub fn compile(template: &str, cache: &CacheStore, settings: &SyncSettings) -> CompiledPrompt {
    let cleaned = strip_comments(template);
    let split = split_template(&cleaned);

    let prompt = if cache.flag(&settings.prompt_flag_key, true) {
        render(&split.main, cache)
    } else {
        String::new()
    };
    let extra = match split.extra {
        Some(extra) if cache.flag(&settings.extra_flag_key, false) => render(&extra, cache),
        _ => String::new(),
    };
    CompiledPrompt { prompt, extra }
}

fn render(text: &str, cache: &CacheStore) -> String {
    let toggled = apply_toggles(text, cache);
    let substituted = substitute_placeholders(&toggled, cache);
    apply_directives(&substituted)
}

/// Keeps the body of each toggle pair whose value is truthy and drops the
/// others, tags included. A toggle without a cache entry counts as on.
///
/// Kept bodies are processed again, so nested pairs apply. A pair that
/// starts inside an earlier pair but closes after it is left to the
/// enclosing body.
#[must_use]
pub fn apply_toggles(text: &str, cache: &CacheStore) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for toggle in toggle_tags(text) {
        let start = usize::from(toggle.open.start());
        if start < cursor {
            continue;
        }
        out.push_str(&text[cursor..start]);
        if cache.flag(&toggle.name, true) {
            out.push_str(&apply_toggles(&text[toggle.body], cache));
        }
        cursor = toggle.close.end().into();
    }
    out.push_str(&text[cursor..]);
    out
}

/// Replaces every placeholder tag with the display form of its value.
///
/// Only the name part of the tag matters, so `{{name}}` and the full
/// five-part form both reference the field. Names without a cache entry
/// render as the empty string; tags with a blank name stay literal.
#[must_use]
pub fn substitute_placeholders(text: &str, cache: &CacheStore) -> String {
    let mut out = String::with_capacity(text.len());
    for token in lex(text) {
        let slice = token.text(text);
        let name = (token.kind == TokenKind::PlaceholderTag)
            .then(|| token.body(text))
            .flatten()
            .and_then(|body| body.split(':').next())
            .map(str::trim)
            .filter(|name| !name.is_empty());
        match name {
            Some(name) => {
                if let Some(value) = cache.get(name) {
                    out.push_str(&value.to_string());
                }
            }
            None => out.push_str(slice),
        }
    }
    out
}
