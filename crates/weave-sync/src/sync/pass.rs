//! One reconciliation pass.
//!
//! Phases run in a fixed order:
//!
//! 1. remove controls that are no longer declared, or whose kind changed
//! 2. update live controls in declaration order
//! 3. create missing controls in declaration order
//! 4. attach or detach input ports
//!
//! Group exclusivity is tracked across phases 2 and 3: the first grouped
//! toggle found on claims its group and every later member is forced off.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;
use weave_fields::{FieldDecl, FieldKind};

use super::Synchronizer;
use crate::control::{coerce, default_value, Control, ControlOptions};
use crate::report::{ControlOp, PortOp, SyncReport};
use crate::value::Value;

/// Group name to the toggle that holds it.
type GroupOwners = FxHashMap<SmolStr, SmolStr>;

impl Synchronizer {
    pub(super) fn pass(&mut self) -> SyncReport {
        let mut report = SyncReport::default();
        let mut owners = GroupOwners::default();

        self.remove_stale(&mut report);
        self.update_live(&mut owners, &mut report);
        self.create_missing(&mut owners, &mut report);
        self.sync_ports(&mut report);

        let decls = &self.decls;
        self.controls
            .sort_by(|left, _, right, _| decls.position(left).cmp(&decls.position(right)));

        debug!(
            fields = self.decls.len(),
            removed = report.removed().count(),
            updated = report.updated().count(),
            created = report.created().count(),
            ports = report.ports.len(),
            "reconciled"
        );
        report
    }

    fn remove_stale(&mut self, report: &mut SyncReport) {
        let decls = &self.decls;
        let stale: Vec<SmolStr> = self
            .controls
            .values()
            .filter(|control| {
                decls
                    .get(&control.name)
                    .is_none_or(|decl| decl.kind() != control.kind)
            })
            .map(|control| control.name.clone())
            .collect();

        for name in stale {
            let Some(control) = self.controls.shift_remove(&name) else {
                continue;
            };
            if control.port.is_some() {
                report.ports.push(PortOp::Detach { name: name.clone() });
            }
            self.cache.remove(&name);
            report.controls.push(ControlOp::Remove { name });
        }
    }

    fn update_live(&mut self, owners: &mut GroupOwners, report: &mut SyncReport) {
        let toggle_default = self.settings.toggle_default;
        for decl in self.decls.iter() {
            let Some(control) = self.controls.get_mut(&decl.name) else {
                continue;
            };
            let options = ControlOptions::from_decl(decl);

            let regrouped =
                control.kind == FieldKind::Toggle && control.options.group != options.group;
            let mut value = if regrouped {
                Value::Bool(false)
            } else {
                let cached = self.cache.get(&decl.name);
                restore(decl, &options, cached, &control.value, toggle_default)
            };
            claim_group(&decl.name, &options, &mut value, owners);

            if value != control.value || options != control.options {
                report.controls.push(ControlOp::Update {
                    name: decl.name.clone(),
                    value: value.clone(),
                    options: options.clone(),
                });
            }
            control.value = value.clone();
            control.options = options;
            if self.cache.get(&decl.name) != Some(&value) {
                self.cache.set(decl.name.clone(), value);
            }
        }
    }

    fn create_missing(&mut self, owners: &mut GroupOwners, report: &mut SyncReport) {
        let toggle_default = self.settings.toggle_default;
        for (position, decl) in self.decls.iter().enumerate() {
            if self.controls.contains_key(&decl.name) {
                continue;
            }
            let options = ControlOptions::from_decl(decl);
            let mut value = self
                .cache
                .get(&decl.name)
                .and_then(|cached| coerce(decl.kind(), &options, cached))
                .unwrap_or_else(|| default_value(decl, toggle_default));
            claim_group(&decl.name, &options, &mut value, owners);

            self.cache.set(decl.name.clone(), value.clone());
            let control = Control::new(decl, value);
            self.controls.insert(decl.name.clone(), control.clone());
            report.controls.push(ControlOp::Create { position, control });
        }
    }

    fn sync_ports(&mut self, report: &mut SyncReport) {
        for decl in self.decls.iter() {
            let Some(control) = self.controls.get_mut(&decl.name) else {
                continue;
            };
            let wanted = decl.port();
            if control.port == wanted {
                continue;
            }
            if control.port.is_some() {
                report.ports.push(PortOp::Detach {
                    name: decl.name.clone(),
                });
            }
            if let Some(kind) = wanted {
                report.ports.push(PortOp::Attach {
                    name: decl.name.clone(),
                    kind,
                });
            }
            control.port = wanted;
        }
    }
}

/// Value of a live control under new options: the cached value if it fits,
/// else the current value, else the field default.
fn restore(
    decl: &FieldDecl,
    options: &ControlOptions,
    cached: Option<&Value>,
    current: &Value,
    toggle_default: bool,
) -> Value {
    let kind = decl.kind();
    cached
        .and_then(|cached| coerce(kind, options, cached))
        .or_else(|| coerce(kind, options, current))
        .unwrap_or_else(|| default_value(decl, toggle_default))
}

/// Lets the first grouped toggle found on own its group; later ones are
/// forced off.
fn claim_group(
    name: &SmolStr,
    options: &ControlOptions,
    value: &mut Value,
    owners: &mut GroupOwners,
) {
    let Some(group) = &options.group else {
        return;
    };
    if *value != Value::Bool(true) {
        return;
    }
    if owners.contains_key(group) {
        *value = Value::Bool(false);
    } else {
        owners.insert(group.clone(), name.clone());
    }
}
