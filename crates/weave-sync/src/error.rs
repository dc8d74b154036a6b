//! Synchronizer errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use thiserror::Error;
use weave_fields::FieldKind;

/// Errors reported to callers of the synchronizer.
///
/// Template problems never show up here: malformed tags, unparsable bounds
/// and unknown types degrade to fewer or simpler controls instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// No live control has this name.
    #[error("unknown control '{0}'")]
    UnknownControl(SmolStr),

    /// The value cannot be stored in the control.
    #[error("value '{value}' is not valid for {kind} control '{name}'")]
    InvalidValue {
        name: SmolStr,
        kind: FieldKind,
        value: SmolStr,
    },

    /// Cache text that is not a JSON object.
    #[error("malformed cache: {0}")]
    MalformedCache(SmolStr),

    /// Settings that fail to parse or validate.
    #[error("invalid settings: {0}")]
    InvalidConfig(SmolStr),
}
