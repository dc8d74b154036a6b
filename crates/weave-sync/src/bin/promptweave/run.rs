//! Command implementations.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use tracing::info;
use weave_fields::{declare, PortKind};
use weave_sync::{
    compile, CacheStore, Control, ControlHost, ControlOptions, SyncSettings, Synchronizer, Value,
};

/// Prints reconciliation instructions, one per line.
#[derive(Debug, Default)]
struct PrintHost;

impl ControlHost for PrintHost {
    fn create_control(&mut self, position: usize, control: &Control) {
        println!(
            "create #{position} {} ({}) = {}",
            control.name,
            control.kind,
            display_value(&control.value)
        );
    }

    fn update_control(&mut self, name: &str, value: &Value, _options: &ControlOptions) {
        println!("update {name} = {}", display_value(value));
    }

    fn remove_control(&mut self, name: &str) {
        println!("remove {name}");
    }

    fn attach_port(&mut self, name: &str, kind: PortKind) {
        println!("attach {name} ({kind})");
    }

    fn detach_port(&mut self, name: &str) {
        println!("detach {name}");
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Text(text) => format!("{text:?}"),
        other => other.to_string(),
    }
}

pub fn run_declare(settings: &SyncSettings, template: &Path, extra: bool) -> anyhow::Result<()> {
    let text = read_template(template)?;
    let decls = declare(&text, extra, &settings.reserved_names());
    for decl in decls.iter() {
        let mut line = format!("{} {}", decl.name, decl.kind());
        if let (Some(min), Some(max)) = (decl.info.min, decl.info.max) {
            line.push_str(&format!(" [{min}, {max}]"));
        } else if let Some(min) = decl.info.min {
            line.push_str(&format!(" [{min}, ..]"));
        } else if let Some(max) = decl.info.max {
            line.push_str(&format!(" [.., {max}]"));
        }
        if let Some(group) = &decl.group {
            line.push_str(&format!(" group={group}"));
        }
        if let Some(port) = decl.port() {
            line.push_str(&format!(" port={port}"));
        }
        println!("{line}");
    }
    for diagnostic in decls.diagnostics() {
        eprintln!("note: {diagnostic}");
    }
    Ok(())
}

pub fn run_sync(
    settings: SyncSettings,
    template: &Path,
    cache: &Path,
    extra: Option<bool>,
    assignments: &[(String, String)],
) -> anyhow::Result<()> {
    let text = read_template(template)?;
    let stored = read_cache(cache)?;

    let mut sync = Synchronizer::new(settings);
    let mut report = sync.load_cache(&stored);
    report.merge(sync.set_template(text));
    if let Some(active) = extra {
        report.merge(sync.set_extra_active(active));
    }
    for (name, value) in assignments {
        let change = sync
            .set_value(name, Value::from_literal(value))
            .with_context(|| format!("failed to set '{name}'"))?;
        report.merge(change);
    }
    report.replay(&mut PrintHost);

    fs::write(cache, sync.save_cache())
        .with_context(|| format!("failed to write cache {}", cache.display()))?;
    info!(
        controls = sync.controls().count(),
        path = %cache.display(),
        "cache saved"
    );
    Ok(())
}

pub fn run_compile(settings: &SyncSettings, template: &Path, cache: &Path) -> anyhow::Result<()> {
    let text = read_template(template)?;
    let store = CacheStore::deserialize(&read_cache(cache)?);
    let compiled = compile(&text, &store, settings);
    println!("{}", compiled.prompt);
    if !compiled.extra.is_empty() {
        println!("--- extra ---");
        println!("{}", compiled.extra);
    }
    Ok(())
}

fn read_template(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read template {}", path.display()))
}

fn read_cache(path: &Path) -> anyhow::Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read cache {}", path.display()))
        }
    }
}
