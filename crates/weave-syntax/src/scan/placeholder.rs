use smol_str::SmolStr;
use text_size::TextRange;

use crate::flags::parse_flag;
use crate::lexer::{Lexer, TokenKind};

/// Type token used when the type position of a tag is empty.
pub const DEFAULT_TYPE_TOKEN: &str = "STRING";

/// Number of colon-separated positions a placeholder tag must have.
pub const PLACEHOLDER_PARTS: usize = 5;

/// A placeholder tag `{{name:type:min:max:use_input}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Trimmed, case-preserving field name.
    pub name: SmolStr,
    /// Upper-cased type token (`STRING` when empty).
    pub type_token: SmolStr,
    /// Third position: minimum for numeric kinds, value/options otherwise.
    pub min_token: SmolStr,
    /// Fourth position: maximum for numeric kinds, default otherwise.
    pub max_token: SmolStr,
    /// Whether the field asks for an external input port.
    pub use_input: bool,
    /// Range of the whole tag, braces included.
    pub range: TextRange,
}

impl Placeholder {
    /// Parses the text between `{{` and `}}`.
    ///
    /// The body is split on `:` into at most [`PLACEHOLDER_PARTS`] parts; the
    /// last part keeps any further colons. Bodies with fewer parts, or with
    /// an empty name, yield `None`.
    #[must_use]
    pub fn parse_body(body: &str, range: TextRange) -> Option<Self> {
        let parts: Vec<&str> = body.splitn(PLACEHOLDER_PARTS, ':').collect();
        let [name, type_token, min_token, max_token, use_input] = parts.as_slice() else {
            return None;
        };

        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let type_token = match type_token.trim() {
            "" => SmolStr::new(DEFAULT_TYPE_TOKEN),
            token => SmolStr::new(token.to_ascii_uppercase()),
        };

        Some(Self {
            name: SmolStr::new(name),
            type_token,
            min_token: SmolStr::new(min_token.trim()),
            max_token: SmolStr::new(max_token.trim()),
            use_input: parse_flag(use_input),
            range,
        })
    }
}

/// Lazy iterator over the well-formed placeholders of a text.
///
/// Records come in left-to-right order and are not deduplicated.
pub struct Placeholders<'src> {
    lexer: Lexer<'src>,
}

impl Iterator for Placeholders<'_> {
    type Item = Placeholder;

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.lexer.source();
        loop {
            let token = self.lexer.next()?;
            if token.kind != TokenKind::PlaceholderTag {
                continue;
            }
            let Some(body) = token.body(source) else {
                continue;
            };
            if let Some(placeholder) = Placeholder::parse_body(body, token.range) {
                return Some(placeholder);
            }
        }
    }
}

/// Scans `text` for placeholder tags.
#[must_use]
pub fn placeholders(text: &str) -> Placeholders<'_> {
    Placeholders {
        lexer: Lexer::new(text),
    }
}
