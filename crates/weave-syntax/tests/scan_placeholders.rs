mod common;
use common::*;

use weave_syntax::{placeholders, strip_comments};

#[test]
fn scenario_text_field_with_toggle() {
    insta::assert_snapshot!(
        describe_placeholders("Hello {{name:STRING::: false}} [[opt]]x[[/opt]]"),
        @r#"name STRING min="" max="" input=false"#
    );
}

#[test]
fn scenario_integer_with_port() {
    insta::assert_snapshot!(
        describe_placeholders("{{level:INT:1:10:true}}"),
        @r#"level INT min="1" max="10" input=true"#
    );
}

#[test]
fn scenario_malformed_tag() {
    assert_eq!(placeholders("{{onlytwo:parts}}").count(), 0);
}

#[test]
fn order_and_duplicates_are_kept() {
    insta::assert_snapshot!(
        describe_placeholders("{{b:int:0:5:no}} {{a:Float2:0:1:yes}} {{b:INT:1:3:no}}"),
        @r#"
    b INT min="0" max="5" input=false
    a FLOAT2 min="0" max="1" input=true
    b INT min="1" max="3" input=false
    "#
    );
}

#[test]
fn commented_tags_are_ignored() {
    let source = "{{a::::}}\n// {{b::::}}\n# {{c::::}}\n/* {{d::::}} */";
    let names: Vec<_> = placeholders(&strip_comments(source))
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["a"]);
}

#[test]
fn name_is_trimmed_and_case_preserved() {
    let p = placeholders("{{  MixedCase :combo:a|b:b:0}}").next().unwrap();
    assert_eq!(p.name, "MixedCase");
    assert_eq!(p.type_token, "COMBO");
    assert_eq!(p.min_token, "a|b");
}

#[test]
fn braces_inside_body_break_the_tag() {
    assert_eq!(placeholders("{{a{b:::: }}").count(), 0);
    assert_eq!(placeholders("{{{a::::}}}").count(), 1);
}

#[test]
fn ranges_point_at_tags() {
    let text = "ab {{x::::}} cd";
    let p = placeholders(text).next().unwrap();
    assert_eq!(&text[p.range], "{{x::::}}");
}
