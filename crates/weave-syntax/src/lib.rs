//! `weave-syntax` - Comment stripping, lexer, and tag scanners for promptweave templates.
//!
//! This crate provides the low-level text analysis for templates:
//!
//! - **Comments**: Removes `/* */`, `// ...` and `#` comment lines
//! - **Lexer**: Splits cleaned text into tag tokens and plain text
//! - **Scanners**: Extracts placeholder tags, toggle tag pairs and the
//!   optional `[%extra%]` / `[%vars%]` blocks
//!
//! # Design Principles
//!
//! - **Lazy**: Placeholders are produced by an iterator over the token stream
//! - **Error-tolerant**: Malformed tags are skipped; scanning never fails
//! - **Position-aware**: Every record carries its byte range in the scanned text
//!
//! # Example
//!
//! ```
//! use weave_syntax::{placeholders, strip_comments, toggle_tags};
//!
//! let source = "Hello {{name:STRING:::false}} // greeting\n[[opt]]x[[/opt]]";
//! let cleaned = strip_comments(source);
//!
//! let names: Vec<_> = placeholders(&cleaned).map(|p| p.name).collect();
//! assert_eq!(names, ["name"]);
//!
//! let toggles = toggle_tags(&cleaned);
//! assert_eq!(toggles[0].name, "opt");
//! assert_eq!(toggles[0].group, None);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod comments;
pub mod flags;
pub mod lexer;
pub mod scan;

pub use comments::strip_comments;
pub use flags::parse_flag;
pub use lexer::{lex, Lexer, Token, TokenKind};
pub use scan::{
    extra_block, placeholders, split_template, toggle_tags, vars_block, Block, BlockKind,
    Placeholder, SplitTemplate, ToggleTag,
};
