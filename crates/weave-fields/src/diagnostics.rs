//! Non-fatal findings produced while building declarations.

use smol_str::SmolStr;
use text_size::TextRange;

use crate::decl::Scope;

/// What was wrong with a tag that was dropped or merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A later placeholder with the same name and kind updated the first one.
    DuplicateMerged,
    /// A later tag reused a name with a different kind and was dropped.
    NameConflict,
    /// The tag used a reserved name and was dropped.
    ReservedName,
}

/// A declaration finding, pointing at the tag that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclDiagnostic {
    /// Finding kind.
    pub kind: DiagnosticKind,
    /// Field name the tag used.
    pub name: SmolStr,
    /// Scope text the range refers to.
    pub scope: Scope,
    /// Range of the tag within its scope text.
    pub range: TextRange,
}

impl std::fmt::Display for DeclDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.kind {
            DiagnosticKind::DuplicateMerged => "duplicate field merged into first occurrence",
            DiagnosticKind::NameConflict => "name already declared with another kind; tag ignored",
            DiagnosticKind::ReservedName => "reserved name; tag ignored",
        };
        write!(f, "{} ({:?} {:?}): {what}", self.name, self.scope, self.range)
    }
}
