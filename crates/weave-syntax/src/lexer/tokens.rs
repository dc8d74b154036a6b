//! Token definitions for promptweave templates.
//!
//! Only tag delimiters are significant; every other run of characters is
//! [`TokenKind::Text`]. A `{` or `[` that does not start a complete tag is
//! lexed as a one-character text token.

use logos::Logos;

/// All token kinds in a template.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum TokenKind {
    // =========================================================================
    // TAGS
    // =========================================================================
    /// Placeholder tag: `{{name:type:min:max:use_input}}`
    #[regex(r"\{\{[^{}]*\}\}")]
    PlaceholderTag,

    /// Toggle tag, opening or closing: `[[name]]`, `[[name:group]]`, `[[/name]]`
    #[regex(r"\[\[[^\[\]]+\]\]")]
    ToggleTag,

    /// `[%extra%]`
    #[token("[%extra%]")]
    ExtraOpen,

    /// `[%/extra%]`
    #[token("[%/extra%]")]
    ExtraClose,

    /// `[%vars%]`
    #[token("[%vars%]")]
    VarsOpen,

    /// `[%/vars%]`
    #[token("[%/vars%]")]
    VarsClose,

    /// Formatting directive start: `{%name%}`
    #[regex(r"\{%[A-Za-z_]+%\}")]
    DirectiveOpen,

    /// Formatting directive end: `{%name stop%}`
    #[regex(r"\{%[A-Za-z_]+ stop%\}")]
    DirectiveClose,

    // =========================================================================
    // TEXT
    // =========================================================================
    /// Any text outside of tags.
    #[regex(r"[^{\[]+")]
    #[token("{")]
    #[token("[")]
    Text,

    /// Unrecognized input.
    Error,
}

impl TokenKind {
    /// Returns true for plain text.
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::Text | Self::Error)
    }

    /// Returns the inner text of a tag token, without its delimiters.
    ///
    /// Text and block delimiters have no inner text and return `None`.
    #[must_use]
    pub fn tag_body(self, slice: &str) -> Option<&str> {
        match self {
            Self::PlaceholderTag | Self::ToggleTag => slice.get(2..slice.len() - 2),
            Self::DirectiveOpen => slice.get(2..slice.len() - 2),
            Self::DirectiveClose => slice.get(2..slice.len() - " stop%}".len()),
            _ => None,
        }
    }
}
