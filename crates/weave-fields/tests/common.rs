//! Shared helpers for declaration tests.
#![allow(dead_code)]

use weave_fields::{declare, Declarations, ReservedNames};

pub fn decls(template: &str, extra_active: bool) -> Declarations {
    declare(template, extra_active, &ReservedNames::default())
}

/// One line per declared field.
pub fn describe(template: &str, extra_active: bool) -> String {
    decls(template, extra_active)
        .iter()
        .map(|field| {
            let mut line = format!("{} {} {:?}", field.name, field.kind(), field.scope);
            if let Some(port) = field.port() {
                line.push_str(&format!(" port={port}"));
            }
            if let Some(group) = &field.group {
                line.push_str(&format!(" group={group}"));
            }
            if field.info.min.is_some() || field.info.max.is_some() {
                line.push_str(&format!(" bounds={:?}..{:?}", field.info.min, field.info.max));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
