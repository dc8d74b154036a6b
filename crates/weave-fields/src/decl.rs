//! Field declaration builder.
//!
//! A template is declared by stripping comments, dropping the vars block,
//! splitting off the extra block, and scanning placeholders and toggle
//! pairs. The extra block is only scanned when the "extra active" flag is
//! set; otherwise its fields do not exist.
//!
//! Field order is: main placeholders, extra placeholders, main toggles,
//! extra toggles. Names are unique across the whole list:
//!
//! - a repeated placeholder with the same kind updates the first occurrence
//!   in place (bounds, options, input flag), keeping its position
//! - a repeated placeholder with a different kind is dropped
//! - a toggle whose name is already a placeholder is dropped
//! - a repeated toggle keeps the first occurrence and its group
//! - reserved names are dropped

use indexmap::IndexMap;
use smol_str::SmolStr;
use text_size::TextRange;
use tracing::debug;
use weave_syntax::{placeholders, split_template, strip_comments, toggle_tags, Placeholder};

use crate::diagnostics::{DeclDiagnostic, DiagnosticKind};
use crate::kind::{FieldKind, PortKind};
use crate::names::ReservedNames;
use crate::types::{map_type, TypeInfo};

/// Characters separating combo options in the value position.
pub const COMBO_SEPARATORS: [char; 2] = ['|', ';'];

/// Which part of the template a field was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Outside the extra block.
    Main,
    /// Inside the extra block.
    Extra,
}

/// Which tag syntax declared a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOrigin {
    /// `{{name:type:min:max:use_input}}`
    Placeholder,
    /// `[[name]]...[[/name]]`
    ToggleTag,
}

/// One declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Field name, unique within the declarations.
    pub name: SmolStr,
    /// Tag syntax the field came from.
    pub origin: FieldOrigin,
    /// Scope of the first occurrence.
    pub scope: Scope,
    /// Mapped type.
    pub info: TypeInfo,
    /// Upper-cased type token (`BOOLEAN` for toggle tags).
    pub type_token: SmolStr,
    /// Third placeholder position.
    pub min_token: SmolStr,
    /// Fourth placeholder position.
    pub max_token: SmolStr,
    /// Exclusivity group of a toggle tag.
    pub group: Option<SmolStr>,
    /// Whether an external input port is requested.
    pub use_input: bool,
}

impl FieldDecl {
    fn from_placeholder(placeholder: &Placeholder, scope: Scope) -> Self {
        Self {
            name: placeholder.name.clone(),
            origin: FieldOrigin::Placeholder,
            scope,
            info: map_type(
                &placeholder.type_token,
                &placeholder.min_token,
                &placeholder.max_token,
            ),
            type_token: placeholder.type_token.clone(),
            min_token: placeholder.min_token.clone(),
            max_token: placeholder.max_token.clone(),
            group: None,
            use_input: placeholder.use_input,
        }
    }

    fn from_toggle(name: SmolStr, group: Option<SmolStr>, scope: Scope) -> Self {
        Self {
            name,
            origin: FieldOrigin::ToggleTag,
            scope,
            info: map_type("BOOLEAN", "", ""),
            type_token: SmolStr::new("BOOLEAN"),
            min_token: SmolStr::default(),
            max_token: SmolStr::default(),
            group,
            use_input: false,
        }
    }

    fn update_from(&mut self, later: Self) {
        self.info = later.info;
        self.type_token = later.type_token;
        self.min_token = later.min_token;
        self.max_token = later.max_token;
        self.use_input = later.use_input;
    }

    /// Control kind of the field.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.info.kind
    }

    /// Port kind to attach, if the field requests an input port.
    #[must_use]
    pub fn port(&self) -> Option<PortKind> {
        self.use_input.then_some(self.info.port)
    }

    /// Combo options: the value position split on `|` or `;`, trimmed, empties dropped.
    #[must_use]
    pub fn combo_options(&self) -> Vec<SmolStr> {
        self.min_token
            .split(COMBO_SEPARATORS)
            .map(str::trim)
            .filter(|option| !option.is_empty())
            .map(SmolStr::new)
            .collect()
    }

    /// Initial combo selection: the default position if it is an option,
    /// otherwise the first option.
    #[must_use]
    pub fn combo_default(&self) -> Option<SmolStr> {
        let options = self.combo_options();
        if options.iter().any(|option| *option == self.max_token) {
            return Some(self.max_token.clone());
        }
        options.into_iter().next()
    }

    /// Initial text: the value position, or the default position when empty.
    #[must_use]
    pub fn text_default(&self) -> SmolStr {
        if self.min_token.is_empty() {
            self.max_token.clone()
        } else {
            self.min_token.clone()
        }
    }

    /// Initial boolean value.
    ///
    /// Toggle tags start at `toggle_default`; boolean placeholders read their
    /// value position, or the default position when that is empty.
    #[must_use]
    pub fn flag_default(&self, toggle_default: bool) -> bool {
        match self.origin {
            FieldOrigin::ToggleTag => toggle_default,
            FieldOrigin::Placeholder => weave_syntax::parse_flag(&self.text_default()),
        }
    }
}

/// The ordered, name-unique field list of one template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    fields: IndexMap<SmolStr, FieldDecl>,
    diagnostics: Vec<DeclDiagnostic>,
    has_extra_block: bool,
}

impl Declarations {
    /// Looks up a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.get(name)
    }

    /// Returns true if `name` is a currently needed field.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Position of `name` in declaration order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.get_index_of(name)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDecl> {
        self.fields.values()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &SmolStr> {
        self.fields.keys()
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Tags that were merged or dropped.
    #[must_use]
    pub fn diagnostics(&self) -> &[DeclDiagnostic] {
        &self.diagnostics
    }

    /// Returns true if the template has an extra block, active or not.
    #[must_use]
    pub fn has_extra_block(&self) -> bool {
        self.has_extra_block
    }
}

struct DeclBuilder<'a> {
    reserved: &'a ReservedNames,
    decls: Declarations,
}

impl<'a> DeclBuilder<'a> {
    fn new(reserved: &'a ReservedNames) -> Self {
        Self {
            reserved,
            decls: Declarations::default(),
        }
    }

    fn report(&mut self, kind: DiagnosticKind, name: &SmolStr, scope: Scope, range: TextRange) {
        debug!(field = %name, ?kind, ?scope, "template tag not declared as written");
        self.decls.diagnostics.push(DeclDiagnostic {
            kind,
            name: name.clone(),
            scope,
            range,
        });
    }

    fn add_placeholders(&mut self, text: &str, scope: Scope) {
        for placeholder in placeholders(text) {
            let (name, range) = (&placeholder.name, placeholder.range);
            if self.reserved.contains(name) {
                self.report(DiagnosticKind::ReservedName, name, scope, range);
                continue;
            }
            let decl = FieldDecl::from_placeholder(&placeholder, scope);
            match self.decls.fields.get(name).map(FieldDecl::kind) {
                None => {
                    self.decls.fields.insert(name.clone(), decl);
                }
                Some(kind) if kind == decl.kind() => {
                    if let Some(existing) = self.decls.fields.get_mut(name) {
                        existing.update_from(decl);
                    }
                    self.report(DiagnosticKind::DuplicateMerged, name, scope, range);
                }
                Some(_) => self.report(DiagnosticKind::NameConflict, name, scope, range),
            }
        }
    }

    fn add_toggles(&mut self, text: &str, scope: Scope) {
        for toggle in toggle_tags(text) {
            let range = toggle.range();
            if self.reserved.contains(&toggle.name) {
                self.report(DiagnosticKind::ReservedName, &toggle.name, scope, range);
                continue;
            }
            match self.decls.fields.get(&toggle.name).map(|decl| decl.origin) {
                None => {
                    let decl = FieldDecl::from_toggle(toggle.name.clone(), toggle.group, scope);
                    self.decls.fields.insert(toggle.name, decl);
                }
                Some(FieldOrigin::ToggleTag) => {}
                Some(FieldOrigin::Placeholder) => {
                    self.report(DiagnosticKind::NameConflict, &toggle.name, scope, range);
                }
            }
        }
    }

    fn finish(mut self, has_extra_block: bool) -> Declarations {
        self.decls.has_extra_block = has_extra_block;
        self.decls
    }
}

/// Builds the declarations of `template`.
///
/// Fields inside the extra block are declared only when `extra_active` is
/// true. Malformed tags are skipped without error.
#[must_use]
pub fn declare(template: &str, extra_active: bool, reserved: &ReservedNames) -> Declarations {
    let cleaned = strip_comments(template);
    let split = split_template(&cleaned);
    let extra = split.extra.as_deref().filter(|_| extra_active);

    let mut builder = DeclBuilder::new(reserved);
    builder.add_placeholders(&split.main, Scope::Main);
    if let Some(extra) = extra {
        builder.add_placeholders(extra, Scope::Extra);
    }
    builder.add_toggles(&split.main, Scope::Main);
    if let Some(extra) = extra {
        builder.add_toggles(extra, Scope::Extra);
    }
    builder.finish(split.extra.is_some())
}
