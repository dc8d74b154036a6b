#![no_main]

use libfuzzer_sys::fuzz_target;
use weave_sync::{Synchronizer, Value};

const MAX_SOURCE_BYTES: usize = 4096;

fn decode_source(bytes: &[u8]) -> String {
    let capped = &bytes[..bytes.len().min(MAX_SOURCE_BYTES)];
    String::from_utf8_lossy(capped).into_owned()
}

fn assert_groups_exclusive(sync: &Synchronizer) {
    let mut seen = Vec::new();
    for control in sync.controls().filter(|control| control.is_on()) {
        if let Some(group) = &control.options.group {
            assert!(!seen.contains(group), "two toggles on in group {group}");
            seen.push(group.clone());
        }
    }
}

fn assert_cache_covers_controls(sync: &Synchronizer) {
    for control in sync.controls() {
        assert_eq!(sync.cache().get(&control.name), Some(&control.value));
    }
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split = 1 + usize::from(data[0]) % data.len();
    let template = decode_source(&data[1..split]);
    let edited = decode_source(&data[split..]);

    let mut sync = Synchronizer::default();
    sync.set_template(template.clone());
    assert!(sync.reconcile().is_empty(), "second pass changed controls");
    assert_cache_covers_controls(&sync);
    assert_groups_exclusive(&sync);

    let names: Vec<_> = sync.controls().map(|control| control.name.clone()).collect();
    for (index, name) in names.iter().enumerate() {
        let on = data.get(index).is_some_and(|byte| byte % 2 == 0);
        let _ = sync.set_value(name, Value::Bool(on));
        assert_groups_exclusive(&sync);
    }

    sync.set_extra_active(data[0] % 3 == 0);
    sync.set_template(edited);
    let saved = sync.save_cache();
    assert!(sync.reconcile().is_empty(), "second pass changed controls");
    assert_cache_covers_controls(&sync);
    assert_groups_exclusive(&sync);

    let mut restored = Synchronizer::default();
    restored.load_cache(&saved);
    restored.set_template(sync.template().to_string());
    let left: Vec<_> = restored.controls().collect();
    let right: Vec<_> = sync.controls().collect();
    assert_eq!(left, right, "cache restore diverged");
});
