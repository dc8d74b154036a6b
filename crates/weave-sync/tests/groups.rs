mod common;
use common::*;

use weave_sync::Value;

const GROUPED: &str = "[[a:g]]A[[/a]] [[b:g]]B[[/b]] [[c:g]]C[[/c]] [[d]]D[[/d]]";
const MEMBERS: [&str; 3] = ["a", "b", "c"];

#[test]
fn first_member_is_on_at_creation() {
    let sync = synced(GROUPED);
    assert_eq!(toggles(&sync, &MEMBERS), [true, false, false]);
    assert_eq!(sync.control("d").unwrap().value, Value::Bool(true));
    assert_eq!(sync.control("a").unwrap().options.group.as_deref(), Some("g"));
}

#[test]
fn setting_a_member_turns_the_others_off() {
    let mut sync = synced(GROUPED);
    let report = sync.set_value("b", true).unwrap();
    insta::assert_snapshot!(replay(&report), @r"
    update b = Bool(true)
    update a = Bool(false)
    ");
    assert_eq!(toggles(&sync, &MEMBERS), [false, true, false]);
    assert_eq!(sync.cache().get("a"), Some(&Value::Bool(false)));
    assert_eq!(sync.cache().get("b"), Some(&Value::Bool(true)));

    let report = sync.set_value("c", "yes").unwrap();
    insta::assert_snapshot!(replay(&report), @r"
    update c = Bool(true)
    update b = Bool(false)
    ");
    assert!(sync.control("d").unwrap().is_on());
}

#[test]
fn exactly_one_member_on_after_each_set() {
    let mut sync = synced(GROUPED);
    for member in MEMBERS {
        sync.set_value(member, true).unwrap();
        let on: Vec<_> = MEMBERS
            .iter()
            .filter(|name| sync.control(name).is_some_and(|control| control.is_on()))
            .collect();
        assert_eq!(on, [&member]);
        for name in MEMBERS {
            let cached = sync.cache().get(name).map(Value::as_flag);
            assert_eq!(cached, Some(name == member), "{name}");
        }
    }
}

#[test]
fn turning_a_member_off_leaves_the_others() {
    let mut sync = synced(GROUPED);
    let report = sync.set_value("a", false).unwrap();
    assert_eq!(replay(&report), "update a = Bool(false)");
    assert_eq!(toggles(&sync, &MEMBERS), [false, false, false]);
}

#[test]
fn changed_group_resets_to_off() {
    let mut sync = synced("[[a:g]]A[[/a]] [[b:g]]B[[/b]]");
    sync.set_value("b", true).unwrap();

    let report = sync.set_template("[[a:g]]A[[/a]] [[b:h]]B[[/b]]");
    assert_eq!(replay(&report), "update b = Bool(false)");
    assert_eq!(sync.cache().get("b"), Some(&Value::Bool(false)));
    assert_eq!(sync.control("b").unwrap().options.group.as_deref(), Some("h"));
}

#[test]
fn restored_cache_keeps_first_member_only() {
    let mut sync = synced(GROUPED);
    let report = sync.load_cache(r#"{"a": true, "b": true, "c": true, "d": false}"#);
    assert_eq!(replay(&report), "update d = Bool(false)");
    assert_eq!(toggles(&sync, &MEMBERS), [true, false, false]);
    assert_eq!(sync.cache().get("b"), Some(&Value::Bool(false)));
}

#[test]
fn cached_later_member_wins_when_first_is_off() {
    let mut sync = synced(GROUPED);
    sync.load_cache(r#"{"a": false, "c": true}"#);
    assert_eq!(toggles(&sync, &MEMBERS), [false, false, true]);
    assert!(sync.reconcile().is_empty());
}

#[test]
fn groups_span_the_extra_block() {
    let mut sync = synced("[[a:g]]A[[/a]] [%extra%][[b:g]]B[[/b]][%/extra%]");
    sync.set_extra_active(true);
    assert_eq!(toggles(&sync, &["a", "b"]), [true, false]);
    sync.set_value("b", true).unwrap();
    assert_eq!(toggles(&sync, &["a", "b"]), [false, true]);
}
