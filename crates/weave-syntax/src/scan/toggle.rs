use smol_str::SmolStr;
use text_size::TextRange;

use crate::lexer::{Lexer, TokenKind};

/// A matched toggle pair `[[name]] body [[/name]]` or `[[name:group]] body [[/name]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleTag {
    /// Trimmed toggle name.
    pub name: SmolStr,
    /// Trimmed group name, if the opening tag carried a non-empty one.
    pub group: Option<SmolStr>,
    /// Range of the opening tag.
    pub open: TextRange,
    /// Range of the text between the tags.
    pub body: TextRange,
    /// Range of the closing tag.
    pub close: TextRange,
}

impl ToggleTag {
    /// Range from the start of the opening tag to the end of the closing tag.
    #[must_use]
    pub fn range(&self) -> TextRange {
        self.open.cover(self.close)
    }
}

/// One `[[...]]` tag before pairing.
#[derive(Debug, Clone, Copy)]
enum RawTag<'src> {
    /// `[[name]]`: opens a pair, or closes an open pair of the same name.
    Bare { name: &'src str },
    /// `[[name:group]]`: opens only.
    Grouped { name: &'src str, group: &'src str },
    /// `[[/name]]`: closes only.
    Close { name: &'src str },
}

impl<'src> RawTag<'src> {
    fn parse(body: &'src str) -> Option<Self> {
        if let Some(name) = body.strip_prefix('/') {
            return is_tag_name(name).then_some(Self::Close { name });
        }
        match body.split_once(':') {
            Some((name, group)) => is_tag_name(name).then_some(Self::Grouped { name, group }),
            None => is_tag_name(body).then_some(Self::Bare { name: body }),
        }
    }

    fn opening(self) -> Option<(&'src str, Option<&'src str>)> {
        match self {
            Self::Bare { name } => Some((name, None)),
            Self::Grouped { name, group } => Some((name, Some(group))),
            Self::Close { .. } => None,
        }
    }

    fn closes(self, open_name: &str) -> bool {
        match self {
            Self::Bare { name } | Self::Close { name } => name == open_name,
            Self::Grouped { .. } => false,
        }
    }
}

/// Names are raw (untrimmed) text with no `:` or `/`, and not blank.
fn is_tag_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains([':', '/'])
}

/// Scans `text` for matched toggle pairs, in order of their opening tags.
///
/// Pairing is done in two passes. The first pass collects every `[[...]]`
/// tag. The second pairs each opening tag, left to right, with the nearest
/// later tag that closes the same raw name and is not already part of a pair.
/// Opening tags without a close are dropped. Same-named tags do not nest:
/// an inner `[[a]]` closes the outer one.
#[must_use]
pub fn toggle_tags(text: &str) -> Vec<ToggleTag> {
    let tags: Vec<(RawTag<'_>, TextRange)> = Lexer::new(text)
        .filter(|token| token.kind == TokenKind::ToggleTag)
        .filter_map(|token| {
            let body = token.body(text)?;
            RawTag::parse(body).map(|tag| (tag, token.range))
        })
        .collect();

    let mut claimed = vec![false; tags.len()];
    let mut pairs = Vec::new();

    for (idx, (tag, open_range)) in tags.iter().enumerate() {
        if claimed[idx] {
            continue;
        }
        let Some((name, group)) = tag.opening() else {
            continue;
        };
        let close = tags
            .iter()
            .enumerate()
            .skip(idx + 1)
            .find(|(candidate, (tag, _))| !claimed[*candidate] && tag.closes(name));
        let Some((close_idx, (_, close_range))) = close else {
            continue;
        };

        claimed[idx] = true;
        claimed[close_idx] = true;
        pairs.push(ToggleTag {
            name: SmolStr::new(name.trim()),
            group: group
                .map(str::trim)
                .filter(|group| !group.is_empty())
                .map(SmolStr::new),
            open: *open_range,
            body: TextRange::new(open_range.end(), close_range.start()),
            close: *close_range,
        });
    }

    pairs
}
