use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use tagscript::{
    CompiledType, Context, LinkButtonSpec, Options, Script, ScriptError, User, classify, render, render_with,
};

fn fixed() -> Options {
    Options { now: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()), seed: Some(3) }
}

fn ann() -> User {
    User { id: 7, name: "ann".into(), discriminator: "0".into(), display_name: "Annie".into(), ..Default::default() }
}

proptest! {
    #[test]
    fn scripts_without_groups_are_returned_verbatim(script in "[^{]{0,64}") {
        let out = render_with(&script, &Context::default(), &fixed()).unwrap();
        prop_assert_eq!(out.content, Some(script));
        prop_assert!(out.embeds.is_empty());
        prop_assert!(out.buttons.is_empty());
    }
}

#[test]
fn unknown_groups_survive_without_context() {
    let script = "Hey {user}, {not a tag} and {mystery: x && y}";
    assert_eq!(render(script, &Context::default()).unwrap().content.as_deref(), Some(script));
}

#[test]
fn single_embed_has_no_content() {
    let out = render("{embed}{color: red}{title: Hi}", &Context::default()).unwrap();
    assert_eq!(out.content, None);
    assert_eq!(out.embeds.len(), 1);
    assert_eq!(out.embeds[0].color, Some(0xFF0000));
    assert_eq!(out.embeds[0].title.as_deref(), Some("Hi"));
}

#[test]
fn embeds_keep_their_order() {
    let out = render("{embed}{title: A}{embed}{title: B}", &Context::default()).unwrap();
    let titles: Vec<_> = out.embeds.iter().map(|e| e.title.as_deref()).collect();
    assert_eq!(titles, [Some("A"), Some("B")]);
}

#[test]
fn field_inline_flag() {
    let out = render("{embed}{field: Name && Value && false}", &Context::default()).unwrap();
    let field = &out.embeds[0].fields[0];
    assert_eq!((field.name.as_str(), field.value.as_str(), field.inline), ("Name", "Value", false));
}

#[test]
fn conditional_branches() {
    let ctx = Context::default();
    assert_eq!(render("{if: 5>=3}{yes}{no}", &ctx).unwrap().content.as_deref(), Some("yes"));
    assert_eq!(render("{if: 2>=3}{yes}{no}", &ctx).unwrap().content.as_deref(), Some("no"));
    assert_eq!(render("{if: 5>=3 && yes && no}", &ctx).unwrap().content.as_deref(), Some("yes"));
    assert_eq!(render("{if: 2>=3 && yes && no}", &ctx).unwrap().content.as_deref(), Some("no"));
}

#[test]
fn conditional_without_else_group() {
    let ctx = Context::default();
    assert_eq!(render("{if: 5>=3}{yes}", &ctx).unwrap().content.as_deref(), Some("yes"));
    assert_eq!(render("[{if: 2>=3}{yes}]", &ctx).unwrap().content.as_deref(), Some("[]"));
}

#[test]
fn conditional_without_any_branch_is_an_authoring_error() {
    let err = Script::validated("{if: 5>=3} and more").unwrap_err();
    assert!(matches!(err, ScriptError::MissingParameter { tag: "if", parameter: "output" }));
}

#[test]
fn placeholders_need_their_context() {
    let script = "Welcome {user.mention}!";
    assert_eq!(render(script, &Context::default()).unwrap().content.as_deref(), Some(script));

    let ctx = Context::new().with_user(ann());
    assert_eq!(render(script, &ctx).unwrap().content.as_deref(), Some("Welcome <@7>!"));
}

#[test]
fn link_buttons() {
    let ctx = Context::default();
    let out = render("{button: https://example.com && Label && 🔥}", &ctx).unwrap();
    assert_eq!(
        out.buttons,
        [LinkButtonSpec { url: "https://example.com".into(), label: Some("Label".into()), emoji: Some("🔥".into()) }]
    );

    let out = render("{button: https://example.com && null && null}", &ctx).unwrap();
    assert_eq!(out.buttons[0].label, None);
    assert_eq!(out.buttons[0].emoji, None);
}

#[test]
fn validation_leaves_nothing_behind() {
    let script = Script::validated("{embed}{title: Hi {user.name}}{message: {user}}").unwrap();
    assert_eq!(script.kind(), CompiledType::Embed);

    let ctx = Context::new().with_user(ann());
    let first = script.render_with(&ctx, &fixed()).unwrap();
    let second = script.render_with(&ctx, &fixed()).unwrap();

    assert_eq!(first.embeds.len(), 1);
    assert_eq!(first.embeds[0].title.as_deref(), Some("Hi ann"));
    assert_eq!(first.content.as_deref(), Some("ann"));
    assert_eq!(first, second);
    assert_eq!(script.source(), "{embed}{title: Hi {user.name}}{message: {user}}");
}

#[test]
fn validation_reports_missing_parameters() {
    let err = Script::validated("{embed}{field: OnlyName}").unwrap_err();
    assert!(err.is_user_facing());
    assert!(matches!(err, ScriptError::MissingParameter { tag: "field", parameter: "value" }));
}

#[test]
fn classify_distinguishes_text_and_embed() {
    assert_eq!(classify("just words").unwrap(), CompiledType::Text);
    assert_eq!(classify("{embed}{description: hi}").unwrap(), CompiledType::Embed);
    assert_eq!(classify("{embed}").unwrap(), CompiledType::Text);
}

#[test]
fn context_deserializes_from_json() {
    let ctx: Context = serde_json::from_str(
        r#"{
            "user": {"id": 7, "name": "ann", "discriminator": "0"},
            "reason": "spamming",
            "case_id": 12
        }"#,
    )
    .unwrap();

    let out = render("{user} was banned for {reason} (case {case.id})", &ctx).unwrap();
    assert_eq!(out.content.as_deref(), Some("ann was banned for spamming (case 12)"));
}
