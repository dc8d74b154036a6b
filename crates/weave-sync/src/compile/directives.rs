//! Formatting directives: `{%name%} ... {%name stop%}`.

use quick_xml::escape::resolve_html5_entity;
use weave_syntax::{lex, TokenKind};

/// A text transformation applied to the body of a directive block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    /// Collapse whitespace runs to one space and trim.
    Spaceless,
    /// Lowercase.
    Lower,
    /// Uppercase.
    Upper,
    /// Capitalize each word, lowercase the rest.
    Title,
    /// Capitalize the first letter of each sentence.
    Sentence,
    /// Trim surrounding whitespace.
    Trim,
    /// Remove the common leading indentation.
    Dedent,
    /// Squeeze runs of newlines into one.
    CollapseNewlines,
    /// Delete ASCII punctuation.
    StripPunct,
    /// Decode HTML character references.
    UnescapeHtml,
    /// Drop empty lines and left-trim the others.
    List,
    /// Drop empty lines and trim the others.
    ListRtrim,
    /// Join non-empty lines as `a, b and c`.
    ListAnd,
}

impl Directive {
    /// Looks up a directive by its name or alias. Names are case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "spaceless" | "sl" => Self::Spaceless,
            "lower" | "lw" => Self::Lower,
            "upper" | "up" => Self::Upper,
            "title" | "tl" => Self::Title,
            "sentence" | "snt" => Self::Sentence,
            "trim" | "tr" => Self::Trim,
            "dedent" | "dd" => Self::Dedent,
            "collapse_newlines" | "cnl" => Self::CollapseNewlines,
            "strip_punct" | "sp" => Self::StripPunct,
            "unescape_html" | "uneh" => Self::UnescapeHtml,
            "list" | "cl" => Self::List,
            "list_rtrim" | "clr" => Self::ListRtrim,
            "list_and" | "la" => Self::ListAnd,
            _ => return None,
        })
    }

    /// Transforms `text`.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Spaceless => text.split_whitespace().collect::<Vec<_>>().join(" "),
            Self::Lower => text.to_lowercase(),
            Self::Upper => text.to_uppercase(),
            Self::Title => title_case(text),
            Self::Sentence => sentence_case(text),
            Self::Trim => text.trim().to_string(),
            Self::Dedent => dedent(text),
            Self::CollapseNewlines => collapse_newlines(text),
            Self::StripPunct => text.chars().filter(|ch| !ch.is_ascii_punctuation()).collect(),
            Self::UnescapeHtml => unescape_html(text),
            Self::List => non_empty_lines(text, str::trim_start).join("\n"),
            Self::ListRtrim => non_empty_lines(text, str::trim).join("\n"),
            Self::ListAnd => list_and(text),
        }
    }
}

/// Applies every directive block in `text`.
///
/// The leftmost opening tag of a known directive is paired with the first
/// later stop tag of the same name. Its body is processed first, so nested
/// blocks apply innermost-first, then the result replaces the whole block.
/// Opening tags without a stop tag and unknown names stay literal.
#[must_use]
pub fn apply_directives(text: &str) -> String {
    let mut text = text.to_string();
    while let Some((directive, outer, inner)) = find_block(&text) {
        let body = apply_directives(&text[inner.0..inner.1]);
        let result = directive.apply(&body);
        text.replace_range(outer.0..outer.1, &result);
    }
    text
}

type Span = (usize, usize);

fn find_block(text: &str) -> Option<(Directive, Span, Span)> {
    let tokens = lex(text);
    for (index, open) in tokens.iter().enumerate() {
        if open.kind != TokenKind::DirectiveOpen {
            continue;
        }
        let Some(name) = open.body(text) else {
            continue;
        };
        let Some(directive) = Directive::from_name(name) else {
            continue;
        };
        let close = tokens[index + 1..].iter().find(|close| {
            close.kind == TokenKind::DirectiveClose && close.body(text) == Some(name)
        });
        if let Some(close) = close {
            let outer: Span = (open.range.start().into(), close.range.end().into());
            let inner: Span = (open.range.end().into(), close.range.start().into());
            return Some((directive, outer, inner));
        }
    }
    None
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

fn sentence_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut capitalize = true;
    let mut after_terminator = false;
    for ch in text.trim().chars() {
        if capitalize && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
            capitalize = false;
            after_terminator = false;
            continue;
        }
        if out.is_empty() {
            // Only a leading letter is capitalized at the start.
            capitalize = false;
        }
        match ch {
            '.' | '!' | '?' => {
                after_terminator = true;
                capitalize = false;
            }
            ch if ch.is_whitespace() && after_terminator => capitalize = true,
            _ => {
                after_terminator = false;
                capitalize = false;
            }
        }
        out.push(ch);
    }
    out
}

fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| &line[..line.len() - line.trim_start().len()])
        .reduce(common_prefix)
        .unwrap_or("");

    text.split_inclusive('\n')
        .map(|line| {
            let (content, ending) = match line.strip_suffix('\n') {
                Some(content) => (content, "\n"),
                None => (line, ""),
            };
            if content.trim().is_empty() {
                ending.to_string()
            } else {
                format!("{}{ending}", content.strip_prefix(indent).unwrap_or(content))
            }
        })
        .collect()
}

fn common_prefix<'a>(left: &'a str, right: &'a str) -> &'a str {
    let len = left
        .char_indices()
        .zip(right.chars())
        .find(|((_, a), b)| a != b)
        .map_or(left.len().min(right.len()), |((index, _), _)| index);
    &left[..len]
}

fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\n' && out.ends_with('\n') {
            continue;
        }
        out.push(ch);
    }
    out
}

fn non_empty_lines<'a>(text: &'a str, trim: fn(&'a str) -> &'a str) -> Vec<&'a str> {
    text.lines().map(trim).filter(|line| !line.is_empty()).collect()
}

fn list_and(text: &str) -> String {
    let mut items = non_empty_lines(text, str::trim);
    let Some(last) = items.pop() else {
        return String::new();
    };
    if items.is_empty() {
        return last.to_string();
    }
    format!("{} and {last}", items.join(", "))
}

/// Named references that decode without a trailing `;`.
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr",
    "micro", "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm",
    "oslash", "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy",
    "sup1", "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Windows-1252 characters for numeric references in `0x80..=0x9F`.
const CP1252_HIGH: [char; 32] = [
    '\u{20ac}', '\u{81}', '\u{201a}', '\u{192}', '\u{201e}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{2c6}', '\u{2030}', '\u{160}', '\u{2039}', '\u{152}', '\u{8d}', '\u{17d}', '\u{8f}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201c}', '\u{201d}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{2dc}', '\u{2122}', '\u{161}', '\u{203a}', '\u{153}', '\u{9d}', '\u{17e}', '\u{178}',
];

fn unescape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start + 1..];
        let consumed = if rest.starts_with('#') {
            decode_numeric(rest, &mut out)
        } else {
            decode_named(rest, &mut out)
        };
        match consumed {
            Some(consumed) => rest = &rest[consumed..],
            None => out.push('&'),
        }
    }
    out.push_str(rest);
    out
}

/// Decodes `#123;` or `#x7b;` (the `;` is optional) at the start of `text`,
/// returning the bytes consumed.
fn decode_numeric(text: &str, out: &mut String) -> Option<usize> {
    let body = &text[1..];
    let (digits, radix, prefix) = match body.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16, 2),
        None => (body, 10, 1),
    };
    let len = digits
        .find(|ch: char| !ch.is_digit(radix))
        .unwrap_or(digits.len());
    if len == 0 {
        return None;
    }
    let code = u32::from_str_radix(&digits[..len], radix).unwrap_or(u32::MAX);
    push_code_point(code, out);
    let terminated = digits[len..].starts_with(';');
    Some(prefix + len + usize::from(terminated))
}

fn push_code_point(code: u32, out: &mut String) {
    match code {
        0 => out.push(char::REPLACEMENT_CHARACTER),
        0x0d => out.push('\r'),
        0x80..=0x9f => out.push(CP1252_HIGH[(code - 0x80) as usize]),
        0x01..=0x08 | 0x0b | 0x0e..=0x1f | 0x7f | 0xfdd0..=0xfdef => {}
        _ if code & 0xfffe == 0xfffe && code <= 0x10_ffff => {}
        _ => out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
    }
}

/// Decodes a named reference at the start of `text`, returning the bytes
/// consumed.
///
/// A name followed by `;` decodes through the full HTML5 table. Otherwise the
/// longest legacy name that prefixes the text decodes and the rest stays
/// literal, so `&ampx` is `&x`.
fn decode_named(text: &str, out: &mut String) -> Option<usize> {
    let name_len = text
        .char_indices()
        .take_while(|(_, ch)| !matches!(ch, '\t' | '\n' | '\x0c' | ' ' | '<' | '&' | '#' | ';'))
        .take(32)
        .last()
        .map_or(0, |(idx, ch)| idx + ch.len_utf8());
    let name = &text[..name_len];
    if name.is_empty() {
        return None;
    }
    if text[name_len..].starts_with(';') {
        if let Some(decoded) = resolve_html5_entity(name) {
            out.push_str(decoded);
            return Some(name_len + 1);
        }
    }
    let legacy = name
        .char_indices()
        .map(|(idx, ch)| idx + ch.len_utf8())
        .rev()
        .filter(|&end| end >= 2)
        .map(|end| &name[..end])
        .find(|prefix| LEGACY_ENTITIES.contains(prefix))?;
    out.push_str(resolve_html5_entity(legacy)?);
    Some(legacy.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases() {
        assert_eq!(Directive::from_name("sl"), Some(Directive::Spaceless));
        assert_eq!(Directive::from_name("la"), Some(Directive::ListAnd));
        assert_eq!(Directive::from_name("UP"), None);
        assert_eq!(Directive::from_name("bold"), None);
    }

    #[test]
    fn text_transforms() {
        assert_eq!(Directive::Spaceless.apply("  a \n\t b  "), "a b");
        assert_eq!(Directive::Title.apply("hello wORLD, it's"), "Hello World, It'S");
        assert_eq!(
            Directive::Sentence.apply("  one. two!  three? four"),
            "One. Two!  Three? Four"
        );
        assert_eq!(Directive::CollapseNewlines.apply("a\n\n\nb\n"), "a\nb\n");
        assert_eq!(Directive::StripPunct.apply("a, b! (c)"), "a b c");
    }

    #[test]
    fn dedent_keeps_relative_indent() {
        assert_eq!(
            Directive::Dedent.apply("    a\n      b\n   \n    c"),
            "a\n  b\n\nc"
        );
        assert_eq!(Directive::Dedent.apply("a\n  b"), "a\n  b");
    }

    #[test]
    fn lists() {
        let text = "  red \n\n green\n blue  \n";
        assert_eq!(Directive::List.apply(text), "red \ngreen\nblue  ");
        assert_eq!(Directive::ListRtrim.apply(text), "red\ngreen\nblue");
        assert_eq!(Directive::ListAnd.apply(text), "red, green and blue");
        assert_eq!(Directive::ListAnd.apply("only"), "only");
        assert_eq!(Directive::ListAnd.apply("\n \n"), "");
    }

    #[test]
    fn html_entities() {
        assert_eq!(
            Directive::UnescapeHtml.apply("a &amp; b &lt;c&gt; &#65;&#x42; &bogus; & x"),
            "a & b <c> AB &bogus; & x"
        );
        assert_eq!(
            Directive::UnescapeHtml.apply("caf&eacute; &hearts; &rarr; &euro;"),
            "caf\u{e9} \u{2665} \u{2192} \u{20ac}"
        );
    }

    #[test]
    fn html_entities_without_semicolon() {
        assert_eq!(
            Directive::UnescapeHtml.apply("fish &amp chips &ampx &copy2024 &hearts &notin"),
            "fish & chips &x \u{a9}2024 &hearts \u{ac}in"
        );
    }

    #[test]
    fn html_numeric_references() {
        assert_eq!(
            Directive::UnescapeHtml.apply("&#65 &#x263a; &#150; &#0; &#1; &#x110000; &#; &#xZ"),
            "A \u{263a} \u{2013} \u{fffd}  \u{fffd} &#; &#xZ"
        );
    }

    #[test]
    fn nested_blocks() {
        assert_eq!(
            apply_directives("{%up%}a {%lw%}B C{%lw stop%} d{%up stop%}!"),
            "A B C D!"
        );
        assert_eq!(
            apply_directives("{%sl%} x  {%tr%}  y  {%tr stop%} {%sl stop%}"),
            "x y"
        );
    }

    #[test]
    fn unmatched_and_unknown_stay_literal() {
        assert_eq!(apply_directives("{%up%}open"), "{%up%}open");
        assert_eq!(apply_directives("{%bold%}x{%bold stop%}"), "{%bold%}x{%bold stop%}");
        assert_eq!(apply_directives("{%up%}a{%lw stop%}"), "{%up%}a{%lw stop%}");
    }
}
