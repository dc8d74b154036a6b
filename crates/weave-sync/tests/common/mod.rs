//! Shared helpers for synchronizer tests.
#![allow(dead_code)]

use weave_fields::PortKind;
use weave_sync::{Control, ControlHost, ControlOptions, SyncReport, Synchronizer, Value};

/// Host that keeps a log of the instructions it received.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub log: Vec<String>,
}

impl ControlHost for RecordingHost {
    fn create_control(&mut self, position: usize, control: &Control) {
        self.log.push(format!(
            "create {position} {} {} = {:?}",
            control.name, control.kind, control.value
        ));
    }

    fn update_control(&mut self, name: &str, value: &Value, _options: &ControlOptions) {
        self.log.push(format!("update {name} = {value:?}"));
    }

    fn remove_control(&mut self, name: &str) {
        self.log.push(format!("remove {name}"));
    }

    fn attach_port(&mut self, name: &str, kind: PortKind) {
        self.log.push(format!("attach {name} {kind}"));
    }

    fn detach_port(&mut self, name: &str) {
        self.log.push(format!("detach {name}"));
    }
}

/// Replays `report` and returns one line per instruction.
pub fn replay(report: &SyncReport) -> String {
    let mut host = RecordingHost::default();
    report.replay(&mut host);
    host.log.join("\n")
}

/// A synchronizer with default settings and `template` reconciled.
pub fn synced(template: &str) -> Synchronizer {
    let mut sync = Synchronizer::default();
    sync.set_template(template);
    sync
}

/// One line per live control: `name kind = Value`.
pub fn describe_controls(sync: &Synchronizer) -> String {
    sync.controls()
        .map(|control| {
            let mut line = format!("{} {} = {:?}", control.name, control.kind, control.value);
            if let Some(port) = control.port {
                line.push_str(&format!(" port={port}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Values of every toggle in `names`, in order.
pub fn toggles(sync: &Synchronizer, names: &[&str]) -> Vec<bool> {
    names
        .iter()
        .map(|name| {
            sync.control(name)
                .is_some_and(|control| control.value == Value::Bool(true))
        })
        .collect()
}

/// Host that applies instructions to its own list of controls.
#[derive(Debug, Default)]
pub struct MirrorHost {
    pub controls: Vec<(String, Value)>,
    pub ports: Vec<String>,
}

impl MirrorHost {
    /// Lines in the same shape as [`describe_values`].
    pub fn describe(&self) -> String {
        self.controls
            .iter()
            .map(|(name, value)| format!("{name} = {value:?}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ControlHost for MirrorHost {
    fn create_control(&mut self, position: usize, control: &Control) {
        assert!(
            self.controls.iter().all(|(name, _)| name.as_str() != control.name.as_str()),
            "{} created twice",
            control.name
        );
        assert!(position <= self.controls.len(), "{} at {position}", control.name);
        self.controls
            .insert(position, (control.name.to_string(), control.value.clone()));
    }

    fn update_control(&mut self, name: &str, value: &Value, _options: &ControlOptions) {
        let slot = self
            .controls
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .unwrap_or_else(|| panic!("update of unknown control {name}"));
        slot.1 = value.clone();
    }

    fn remove_control(&mut self, name: &str) {
        let before = self.controls.len();
        self.controls.retain(|(existing, _)| existing != name);
        assert_eq!(self.controls.len() + 1, before, "remove of unknown control {name}");
    }

    fn attach_port(&mut self, name: &str, _kind: PortKind) {
        self.ports.push(name.to_owned());
    }

    fn detach_port(&mut self, name: &str) {
        self.ports.retain(|existing| existing != name);
    }
}

/// One line per live control: `name = Value`.
pub fn describe_values(sync: &Synchronizer) -> String {
    sync.controls()
        .map(|control| format!("{} = {:?}", control.name, control.value))
        .collect::<Vec<_>>()
        .join("\n")
}
