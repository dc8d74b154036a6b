//! Tag scanners.
//!
//! Three independent extractors run over comment-free template text:
//!
//! - [`placeholders`]: `{{name:type:min:max:use_input}}` tags
//! - [`toggle_tags`]: `[[name]]...[[/name]]` and `[[name:group]]...[[/name]]` pairs
//! - [`extra_block`] / [`vars_block`]: the first `[%extra%]` / `[%vars%]` region

mod block;
mod placeholder;
mod toggle;

pub use block::{
    extra_block, find_block, remove_block, split_template, vars_block, Block, BlockKind,
    SplitTemplate,
};
pub use placeholder::{placeholders, Placeholder, Placeholders, DEFAULT_TYPE_TOKEN, PLACEHOLDER_PARTS};
pub use toggle::{toggle_tags, ToggleTag};
