//! `weave-sync` - Live controls, value cache, and prompt compiler for promptweave templates.
//!
//! This crate keeps a set of interactive controls in agreement with a
//! template:
//!
//! - **Synchronizer**: Runs reconciliation passes and value changes
//! - **Cache Store**: The persisted name to value map, saved as one JSON object
//! - **Reports**: Ordered create/update/remove and port instructions for a host
//! - **Compiler**: Renders the template with the current values
//! - **Settings**: Flag keys and defaults loaded from TOML
//!
//! # Example
//!
//! ```
//! use weave_sync::{Synchronizer, Value};
//!
//! let mut sync = Synchronizer::default();
//! let report = sync.set_template("Hello {{name:STRING:world::false}} [[opt]]!![[/opt]]");
//! assert_eq!(report.created().count(), 2);
//!
//! sync.set_value("opt", false).unwrap();
//! assert_eq!(sync.compile().prompt, "Hello world ");
//! assert_eq!(sync.cache().get("name"), Some(&Value::from("world")));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod compile;
pub mod control;
pub mod error;
pub mod report;
pub mod settings;
pub mod sync;
pub mod value;

pub use cache::CacheStore;
pub use compile::{compile, CompiledPrompt, Directive};
pub use control::{Control, ControlOptions};
pub use error::SyncError;
pub use report::{ControlHost, ControlOp, PortOp, SyncReport};
pub use settings::SyncSettings;
pub use sync::Synchronizer;
pub use value::Value;
