mod common;
use common::*;

use weave_sync::{Synchronizer, Value};

fn mirror(report: &weave_sync::SyncReport) -> MirrorHost {
    let mut host = MirrorHost::default();
    report.replay(&mut host);
    host
}

#[test]
fn value_changes_fold_into_creations() {
    let mut sync = Synchronizer::default();
    let mut report = sync.set_template("{{n:INT:0:9:false}} [[a:g]]A[[/a]] [[b:g]]B[[/b]]");
    report.merge(sync.set_value("n", 30_i64).unwrap());
    report.merge(sync.set_value("b", true).unwrap());

    insta::assert_snapshot!(replay(&report), @r"
    create 0 n integer = Int(9)
    create 1 a toggle = Bool(false)
    create 2 b toggle = Bool(true)
    ");
    assert_eq!(mirror(&report).describe(), describe_values(&sync));
}

#[test]
fn extra_switched_off_cancels_its_creations() {
    let mut sync = Synchronizer::default();
    let mut report = sync.load_cache(r#"{"extraActive": true}"#);
    report.merge(sync.set_template("main [%extra%]{{x:STRING:hi::false}}[%/extra%]"));
    report.merge(sync.set_extra_active(false));

    assert!(sync.control("x").is_none());
    assert_eq!(replay(&report), "");
}

#[test]
fn cancelled_creation_shifts_later_positions() {
    let mut sync = Synchronizer::default();
    let mut report = sync.load_cache(r#"{"extraActive": true}"#);
    report.merge(sync.set_template(
        "{{a:STRING:x::false}} [%extra%]{{b:STRING:y::false}}[%/extra%] [[c]]C[[/c]]",
    ));
    report.merge(sync.set_extra_active(false));
    report.merge(sync.set_value("c", false).unwrap());

    insta::assert_snapshot!(replay(&report), @r#"
    create 0 a text = Text("x")
    create 1 c toggle = Bool(false)
    "#);
    assert_eq!(mirror(&report).describe(), describe_values(&sync));
}

#[test]
fn merged_report_matches_step_by_step_replay() {
    let template = "{{n:INT:0:9:true}} [[a:g]]A[[/a]] [%extra%]{{x:FLOAT:0:1:true}} [[b:g]]B[[/b]][%/extra%]";
    let mut sync = Synchronizer::default();
    let mut stepwise = MirrorHost::default();
    let mut merged = sync.set_template(template);
    merged.replay(&mut stepwise);

    let steps = [
        sync.set_extra_active(true),
        sync.set_value("b", true).unwrap(),
        sync.set_value("x", 0.5).unwrap(),
        sync.set_extra_active(false),
        sync.set_value("n", 4_i64).unwrap(),
    ];
    for step in steps {
        step.replay(&mut stepwise);
        merged.merge(step);
    }

    let folded = mirror(&merged);
    assert_eq!(folded.describe(), stepwise.describe());
    assert_eq!(folded.describe(), describe_values(&sync));
    assert_eq!(folded.ports, stepwise.ports);
    assert_eq!(sync.cache().get("a"), Some(&Value::Bool(false)));
}
