//! The control synchronizer.
//!
//! A [`Synchronizer`] owns one template, its live controls and its cache
//! store. Every template edit, cache load or extra-flag change runs one
//! reconciliation pass that brings the controls back in line with the
//! template's declarations and returns the instructions for the host.

mod pass;

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::debug;
use weave_fields::{declare, Declarations, FieldKind, ReservedNames};

use crate::cache::CacheStore;
use crate::compile::{compile, CompiledPrompt};
use crate::control::Control;
use crate::error::SyncError;
use crate::report::{ControlOp, SyncReport};
use crate::settings::SyncSettings;
use crate::value::Value;

/// Live controls and cache of one template.
#[derive(Debug, Clone)]
pub struct Synchronizer {
    settings: SyncSettings,
    reserved: ReservedNames,
    template: String,
    decls: Declarations,
    controls: IndexMap<SmolStr, Control>,
    cache: CacheStore,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new(SyncSettings::default())
    }
}

impl Synchronizer {
    /// Creates a synchronizer with an empty template and cache.
    #[must_use]
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            reserved: settings.reserved_names(),
            settings,
            template: String::new(),
            decls: Declarations::default(),
            controls: IndexMap::new(),
            cache: CacheStore::new(),
        }
    }

    /// Replaces the template and reconciles.
    pub fn set_template(&mut self, template: impl Into<String>) -> SyncReport {
        self.template = template.into();
        self.reconcile()
    }

    /// Runs one reconciliation pass on the current template.
    pub fn reconcile(&mut self) -> SyncReport {
        self.decls = declare(&self.template, self.extra_active(), &self.reserved);
        self.pass()
    }

    /// Sets the "extra active" flag and reconciles.
    pub fn set_extra_active(&mut self, active: bool) -> SyncReport {
        self.cache.set(self.settings.extra_flag_key.clone(), active);
        self.reconcile()
    }

    /// Returns the "extra active" flag; off when unset.
    #[must_use]
    pub fn extra_active(&self) -> bool {
        self.cache.flag(&self.settings.extra_flag_key, false)
    }

    /// Replaces the cache store with stored text and reconciles, restoring
    /// the value of every live control that has an entry.
    ///
    /// Malformed text loads as an empty store.
    pub fn load_cache(&mut self, text: &str) -> SyncReport {
        self.cache = CacheStore::deserialize(text);
        self.reconcile()
    }

    /// Serializes the cache store.
    #[must_use]
    pub fn save_cache(&self) -> String {
        self.cache.serialize()
    }

    /// Value-change callback for the control `name`.
    ///
    /// The value is coerced to the control's kind and clamped, then written
    /// to the cache. Setting a grouped toggle on turns every other member of
    /// its group off in the same call. The report holds an update for the
    /// control itself when its stored value changed or coercion altered the
    /// input, plus one per group member turned off.
    pub fn set_value(
        &mut self,
        name: &str,
        value: impl Into<Value>,
    ) -> Result<SyncReport, SyncError> {
        let value = value.into();
        let control = self
            .controls
            .get_mut(name)
            .ok_or_else(|| SyncError::UnknownControl(SmolStr::new(name)))?;
        let coerced = control.coerce(&value)?;

        let mut report = SyncReport::default();
        if coerced != value || coerced != control.value {
            report.controls.push(ControlOp::Update {
                name: control.name.clone(),
                value: coerced.clone(),
                options: control.options.clone(),
            });
        }
        control.value = coerced.clone();
        self.cache.set(control.name.clone(), coerced);

        let group = control
            .is_on()
            .then(|| control.options.group.clone())
            .flatten();
        if let Some(group) = group {
            self.release_group(&group, name, &mut report);
        }
        debug!(control = name, changes = report.controls.len(), "value set");
        Ok(report)
    }

    /// Turns off every toggle in `group` except `owner`.
    fn release_group(&mut self, group: &str, owner: &str, report: &mut SyncReport) {
        for control in self.controls.values_mut() {
            if control.name == owner
                || control.kind != FieldKind::Toggle
                || control.options.group.as_deref() != Some(group)
                || !control.is_on()
            {
                continue;
            }
            control.value = Value::Bool(false);
            self.cache.set(control.name.clone(), false);
            report.controls.push(ControlOp::Update {
                name: control.name.clone(),
                value: control.value.clone(),
                options: control.options.clone(),
            });
        }
    }

    /// Renders the template with the current values.
    #[must_use]
    pub fn compile(&self) -> CompiledPrompt {
        compile(&self.template, &self.cache, &self.settings)
    }

    /// Live controls in declaration order.
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.values()
    }

    /// Looks up a live control.
    #[must_use]
    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.get(name)
    }

    /// The cache store.
    #[must_use]
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Declarations of the last pass.
    #[must_use]
    pub fn declarations(&self) -> &Declarations {
        &self.decls
    }

    /// The current template.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The settings in use.
    #[must_use]
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }
}
