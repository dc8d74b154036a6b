use text_size::TextRange;

use crate::lexer::{Lexer, TokenKind};

/// The kind of a named template region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `[%extra%] ... [%/extra%]`: conditionally included text.
    Extra,
    /// `[%vars%] ... [%/vars%]`: notes, never scanned or rendered.
    Vars,
}

impl BlockKind {
    fn open(self) -> TokenKind {
        match self {
            Self::Extra => TokenKind::ExtraOpen,
            Self::Vars => TokenKind::VarsOpen,
        }
    }

    fn close(self) -> TokenKind {
        match self {
            Self::Extra => TokenKind::ExtraClose,
            Self::Vars => TokenKind::VarsClose,
        }
    }
}

/// A delimited region of the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Which region this is.
    pub kind: BlockKind,
    /// Range of the region, delimiters included.
    pub range: TextRange,
    /// Range of the text between the delimiters.
    pub body: TextRange,
}

/// Finds the first region of `kind` in `text`.
///
/// The region starts at the first opening delimiter and ends at the next
/// opening or closing delimiter of the same kind. Only the first region is
/// recognized; later ones stay in the text untouched.
#[must_use]
pub fn find_block(text: &str, kind: BlockKind) -> Option<Block> {
    let mut lexer = Lexer::new(text);
    let open = lexer.find(|token| token.kind == kind.open())?;
    let close = lexer.find(|token| token.kind == kind.open() || token.kind == kind.close())?;
    Some(Block {
        kind,
        range: open.range.cover(close.range),
        body: TextRange::new(open.range.end(), close.range.start()),
    })
}

/// Finds the first `[%extra%]` region.
#[must_use]
pub fn extra_block(text: &str) -> Option<Block> {
    find_block(text, BlockKind::Extra)
}

/// Finds the first `[%vars%]` region.
#[must_use]
pub fn vars_block(text: &str) -> Option<Block> {
    find_block(text, BlockKind::Vars)
}

/// Returns `text` with `block` (delimiters included) cut out.
#[must_use]
pub fn remove_block(text: &str, block: &Block) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..usize::from(block.range.start())]);
    out.push_str(&text[usize::from(block.range.end())..]);
    out
}

/// Cleaned template text divided into its main scope and optional extra scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitTemplate {
    /// Text outside the vars and extra blocks.
    pub main: String,
    /// Body of the first extra block, if the template has one.
    pub extra: Option<String>,
}

/// Drops the vars block and separates the extra block from the main text.
///
/// `text` is expected to be comment-free already.
#[must_use]
pub fn split_template(text: &str) -> SplitTemplate {
    let without_vars = match vars_block(text) {
        Some(block) => remove_block(text, &block),
        None => text.to_owned(),
    };

    match extra_block(&without_vars) {
        Some(block) => SplitTemplate {
            main: remove_block(&without_vars, &block),
            extra: Some(without_vars[block.body].to_owned()),
        },
        None => SplitTemplate {
            main: without_vars,
            extra: None,
        },
    }
}
