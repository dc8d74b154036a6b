//! `weave-fields` - Field declarations for promptweave templates.
//!
//! This crate turns the raw records of `weave-syntax` into the declaration
//! list a reconciler works from:
//!
//! - **Kinds**: Classifying type tokens into control and port kinds
//! - **Type Mapping**: Precision, step and numeric bounds per field
//! - **Declarations**: One ordered, name-unique list of fields per template
//!
//! # Example
//!
//! ```
//! use weave_fields::{declare, FieldKind, ReservedNames};
//!
//! let decls = declare("{{level:INT:1:10:true}}", false, &ReservedNames::default());
//! let level = decls.get("level").unwrap();
//!
//! assert_eq!(level.kind(), FieldKind::Integer);
//! assert_eq!(level.info.min, Some(1.0));
//! assert_eq!(level.info.max, Some(10.0));
//! assert!(level.use_input);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod decl;
pub mod diagnostics;
pub mod kind;
pub mod names;
pub mod types;

pub use decl::{declare, Declarations, FieldDecl, FieldOrigin, Scope};
pub use diagnostics::{DeclDiagnostic, DiagnosticKind};
pub use kind::{FieldKind, PortKind};
pub use names::{ReservedNames, EXTRA_FLAG_KEY, PROMPT_FLAG_KEY};
pub use types::{clamp_to_bounds, map_type, TypeInfo};
