//! Instruction sets produced by reconciliation.
//!
//! The synchronizer never talks to a UI directly. Each pass returns a
//! [`SyncReport`] that a [`ControlHost`] can replay: control removals first,
//! then in-place updates, then creations at their declaration position, and
//! separately the port attach/detach instructions. Reports of consecutive
//! calls are combined with [`SyncReport::merge`], which keeps arrival order
//! and folds the instructions that target the same control.

use smol_str::SmolStr;
use weave_fields::PortKind;

use crate::control::{Control, ControlOptions};
use crate::value::Value;

/// One control instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlOp {
    /// Destroy the control.
    Remove {
        /// Control name.
        name: SmolStr,
    },
    /// Change the value and/or options of an existing control.
    Update {
        /// Control name.
        name: SmolStr,
        /// New value.
        value: Value,
        /// New options.
        options: ControlOptions,
    },
    /// Create a control at `position` in declaration order.
    Create {
        /// Index the control is inserted at.
        position: usize,
        /// The new control, value included.
        control: Control,
    },
}

impl ControlOp {
    /// Name of the control the instruction targets.
    #[must_use]
    pub fn name(&self) -> &SmolStr {
        match self {
            Self::Remove { name } | Self::Update { name, .. } => name,
            Self::Create { control, .. } => &control.name,
        }
    }
}

/// One input port instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortOp {
    /// Detach the port bound to the control.
    Detach {
        /// Control name.
        name: SmolStr,
    },
    /// Attach a port of `kind` bound to the control.
    Attach {
        /// Control name.
        name: SmolStr,
        /// Port kind.
        kind: PortKind,
    },
}

/// Receiver of reconciliation instructions.
pub trait ControlHost {
    /// A control was declared.
    fn create_control(&mut self, position: usize, control: &Control);
    /// A control's value or options changed.
    fn update_control(&mut self, name: &str, value: &Value, options: &ControlOptions);
    /// A control is no longer declared.
    fn remove_control(&mut self, name: &str);
    /// A control requests an input port.
    fn attach_port(&mut self, name: &str, kind: PortKind);
    /// A control no longer requests an input port.
    fn detach_port(&mut self, name: &str);
}

/// The instructions of one pass or value change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Control instructions, in replay order.
    pub controls: Vec<ControlOp>,
    /// Port instructions.
    pub ports: Vec<PortOp>,
}

impl SyncReport {
    /// Returns true if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty() && self.ports.is_empty()
    }

    /// Appends the instructions of `other`, folding them per control so
    /// that replaying the result leaves a host in the same state as
    /// replaying both reports in turn.
    ///
    /// - An update of a control created in `self` patches the creation.
    /// - An update of a control already updated in `self` replaces it.
    /// - A removal drops pending updates; a removal of a control created in
    ///   `self` drops the creation too and emits nothing. Later creations
    ///   inserted after that position shift down by one.
    /// - A detach cancels a pending attach of the same control.
    pub fn merge(&mut self, other: Self) {
        for op in other.controls {
            self.fold_control(op);
        }
        for op in other.ports {
            self.fold_port(op);
        }
    }

    fn fold_control(&mut self, op: ControlOp) {
        match op {
            ControlOp::Update {
                name,
                value,
                options,
            } => {
                if let Some(control) = self.created_mut(&name) {
                    control.value = value;
                    control.options = options;
                    return;
                }
                let pending = self.controls.iter().position(
                    |op| matches!(op, ControlOp::Update { name: seen, .. } if *seen == name),
                );
                let update = ControlOp::Update {
                    name,
                    value,
                    options,
                };
                match pending {
                    Some(idx) => self.controls[idx] = update,
                    None => self.controls.push(update),
                }
            }
            ControlOp::Remove { name } => {
                self.controls.retain(
                    |op| !matches!(op, ControlOp::Update { name: pending, .. } if *pending == name),
                );
                let created = self.controls.iter().position(
                    |op| matches!(op, ControlOp::Create { control, .. } if control.name == name),
                );
                match created {
                    Some(idx) => self.drop_creation(idx),
                    None => self.controls.push(ControlOp::Remove { name }),
                }
            }
            create @ ControlOp::Create { .. } => self.controls.push(create),
        }
    }

    fn fold_port(&mut self, op: PortOp) {
        if let PortOp::Detach { name } = &op {
            let attached = self
                .ports
                .iter()
                .position(|port| matches!(port, PortOp::Attach { name: seen, .. } if seen == name));
            if let Some(idx) = attached {
                self.ports.remove(idx);
                return;
            }
        }
        self.ports.push(op);
    }

    fn created_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find_map(|op| match op {
            ControlOp::Create { control, .. } if control.name.as_str() == name => Some(control),
            _ => None,
        })
    }

    fn drop_creation(&mut self, idx: usize) {
        let ControlOp::Create { position: dropped, .. } = self.controls.remove(idx) else {
            return;
        };
        for op in &mut self.controls[idx..] {
            if let ControlOp::Create { position, .. } = op {
                if *position > dropped {
                    *position -= 1;
                }
            }
        }
    }

    /// Names of removed controls.
    pub fn removed(&self) -> impl Iterator<Item = &SmolStr> {
        self.controls.iter().filter_map(|op| match op {
            ControlOp::Remove { name } => Some(name),
            _ => None,
        })
    }

    /// Names of updated controls.
    pub fn updated(&self) -> impl Iterator<Item = &SmolStr> {
        self.controls.iter().filter_map(|op| match op {
            ControlOp::Update { name, .. } => Some(name),
            _ => None,
        })
    }

    /// Names of created controls.
    pub fn created(&self) -> impl Iterator<Item = &SmolStr> {
        self.controls.iter().filter_map(|op| match op {
            ControlOp::Create { control, .. } => Some(&control.name),
            _ => None,
        })
    }

    /// Dispatches every instruction to `host`, controls before ports.
    pub fn replay(&self, host: &mut impl ControlHost) {
        for op in &self.controls {
            match op {
                ControlOp::Remove { name } => host.remove_control(name),
                ControlOp::Update {
                    name,
                    value,
                    options,
                } => host.update_control(name, value, options),
                ControlOp::Create { position, control } => {
                    host.create_control(*position, control);
                }
            }
        }
        for op in &self.ports {
            match op {
                PortOp::Detach { name } => host.detach_port(name),
                PortOp::Attach { name, kind } => host.attach_port(name, *kind),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(name: &str, value: bool) -> ControlOp {
        ControlOp::Update {
            name: name.into(),
            value: Value::Bool(value),
            options: ControlOptions::default(),
        }
    }

    fn create(position: usize, name: &str, value: bool) -> ControlOp {
        ControlOp::Create {
            position,
            control: Control {
                name: name.into(),
                kind: weave_fields::FieldKind::Toggle,
                value: Value::Bool(value),
                options: ControlOptions::default(),
                port: None,
            },
        }
    }

    fn report(controls: Vec<ControlOp>) -> SyncReport {
        SyncReport {
            controls,
            ports: Vec::new(),
        }
    }

    #[test]
    fn merge_keeps_arrival_order() {
        let mut merged = report(vec![update("a", true)]);
        merged.merge(SyncReport {
            controls: vec![ControlOp::Remove { name: "b".into() }, update("a", false)],
            ports: vec![PortOp::Detach { name: "b".into() }],
        });
        assert_eq!(
            merged.controls,
            [update("a", false), ControlOp::Remove { name: "b".into() }]
        );
        assert_eq!(merged.ports.len(), 1);
    }

    #[test]
    fn update_patches_earlier_creation() {
        let mut merged = report(vec![create(0, "a", true)]);
        merged.merge(report(vec![update("a", false)]));
        assert_eq!(merged.controls, [create(0, "a", false)]);
    }

    #[test]
    fn removal_cancels_earlier_creation() {
        let mut merged = report(vec![create(0, "a", true), create(1, "b", true)]);
        merged.merge(report(vec![update("a", false)]));
        merged.merge(report(vec![ControlOp::Remove { name: "a".into() }]));
        assert_eq!(merged.controls, [create(0, "b", true)]);
    }

    #[test]
    fn removal_of_existing_control_drops_pending_update() {
        let mut merged = report(vec![update("a", false)]);
        merged.merge(report(vec![ControlOp::Remove { name: "a".into() }]));
        merged.merge(report(vec![create(0, "a", true)]));
        assert_eq!(
            merged.controls,
            [ControlOp::Remove { name: "a".into() }, create(0, "a", true)]
        );
    }

    #[test]
    fn detach_cancels_pending_attach() {
        let mut merged = SyncReport {
            controls: Vec::new(),
            ports: vec![PortOp::Attach {
                name: "a".into(),
                kind: PortKind::Boolean,
            }],
        };
        merged.merge(SyncReport {
            controls: Vec::new(),
            ports: vec![PortOp::Detach { name: "a".into() }],
        });
        assert!(merged.is_empty());
    }
}
