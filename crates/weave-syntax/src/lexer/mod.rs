//! Lexer for promptweave templates.
//!
//! This module provides a lexer that splits template text into tag tokens
//! and text runs, with their positions in the source text.

mod tokens;

pub use tokens::TokenKind;

use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The byte range of the token in the source text.
    pub range: TextRange,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range }
    }

    /// Returns the token's text within `source`.
    #[must_use]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.range]
    }

    /// Returns the tag body of the token within `source`, if it is a tag.
    #[must_use]
    pub fn body<'src>(&self, source: &'src str) -> Option<&'src str> {
        self.kind.tag_body(self.text(source))
    }
}

/// Lexer for template text.
///
/// The lexer is an iterator over tokens. It never fails: text that does not
/// form a tag comes back as [`TokenKind::Text`].
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
    source: &'src str,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
        }
    }

    /// Returns the source text being lexed.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?;
        let span = self.inner.span();

        let kind = kind.unwrap_or(TokenKind::Error);
        let range = TextRange::new(text_size(span.start), text_size(span.end));
        Some(Token::new(kind, range))
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn text_size(offset: usize) -> TextSize {
    TextSize::from(offset as u32)
}

/// Lex the entire source and return all tokens.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Lex source and return tokens paired with their text.
///
/// Useful for debugging and testing.
#[must_use]
pub fn lex_with_text(source: &str) -> Vec<(Token, &str)> {
    Lexer::new(source)
        .map(|token| (token, token.text(source)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .into_iter()
            .map(|t| t.kind)
            .filter(|kind| !kind.is_text())
            .collect()
    }

    #[test]
    fn test_lexer_tags() {
        let source = "a {{x:INT:1:2:no}} [[t]]b[[/t]] [%extra%]c[%/extra%]";
        assert_eq!(
            tag_kinds(source),
            vec![
                TokenKind::PlaceholderTag,
                TokenKind::ToggleTag,
                TokenKind::ToggleTag,
                TokenKind::ExtraOpen,
                TokenKind::ExtraClose,
            ]
        );
    }

    #[test]
    fn test_lexer_preserves_positions() {
        let source = "ab{{n::::}}";
        let tokens = lex(source);

        assert_eq!(tokens[0].range, TextRange::new(0.into(), 2.into()));
        assert_eq!(tokens[1].range, TextRange::new(2.into(), 11.into()));
        assert_eq!(tokens[1].body(source), Some("n::::"));
    }

    #[test]
    fn test_unterminated_tag_is_text() {
        let source = "{{open [[x";
        assert!(lex(source).iter().all(|t| t.kind == TokenKind::Text));

        let text: String = lex_with_text(source).into_iter().map(|(_, s)| s).collect();
        assert_eq!(text, source);
    }

    #[test]
    fn test_directive_tokens() {
        let source = "{%upper%}x{%upper stop%}";
        let tokens = lex(source);
        assert_eq!(tokens[0].kind, TokenKind::DirectiveOpen);
        assert_eq!(tokens[0].body(source), Some("upper"));
        assert_eq!(tokens[2].kind, TokenKind::DirectiveClose);
        assert_eq!(tokens[2].body(source), Some("upper"));
    }
}
