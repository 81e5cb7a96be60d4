use chrono::{NaiveDate, TimeZone, Utc};

use crate::api::{Options, render_with};
use crate::{Context, EmbedAuthor, EmbedFooter, LinkButtonSpec, MessagePayload, ScriptError};

fn fixed() -> Options {
    Options { now: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()), seed: Some(11) }
}

fn run(script: &str) -> MessagePayload {
    render_with(script, &Context::default(), &fixed()).unwrap()
}

fn content(script: &str) -> String {
    run(script).content.unwrap_or_default()
}

// --- Content tags ------------------------------------------------------------

#[test]
fn case_transforms_and_aliases() {
    assert_eq!(content("{lower: HeLLo}"), "hello");
    assert_eq!(content("{uppercase: shout}"), "SHOUT");
    assert_eq!(content("{upper: {lower: MiXeD}} done"), "MIXED done");
}

#[test]
fn hidden_and_quote() {
    assert_eq!(content("{hide: spoiler}"), "||spoiler||");
    assert_eq!(content("{quote: a b/c&d}"), "a%20b%2Fc%26d");
    assert_eq!(content("https://x.io/?q={http: two words}"), "https://x.io/?q=two%20words");
}

#[test]
fn len_counts_lists_numbers_and_chars() {
    assert_eq!(content("{len: a, b, c}"), "3");
    assert_eq!(content("{count: 12,345}"), "12345");
    assert_eq!(content("{size: four}"), "4");
}

#[test]
fn strip_removes_every_occurrence() {
    assert_eq!(content("{strip: a-b-c && -}"), "abc");
    assert_eq!(content("{remove: banana && an}"), "ba");
}

#[test]
fn random_is_reproducible_with_a_seed() {
    let script = "{random: red && green && blue}";
    let first = content(script);
    assert!(["red", "green", "blue"].contains(&first.as_str()));
    for _ in 0..5 {
        assert_eq!(content(script), first);
    }
    assert_eq!(content("{choose: only}"), "only");
}

#[test]
fn if_picks_a_branch() {
    assert_eq!(content("{if: 5>=3 && yes && no}"), "yes");
    assert_eq!(content("{if: 2>=3 && yes && no}"), "no");
    assert_eq!(content("{%: ready == READY && go}"), "go");
    assert_eq!(content("[{if: no && shown}]"), "[]");
}

#[test]
fn if_takes_branches_from_following_groups() {
    assert_eq!(content("{if: 5>=3}{yes}{no}"), "yes");
    assert_eq!(content("{%: 2>=3}{yes}{no}!"), "no!");
    assert_eq!(content("{if: 1,000 > 999}{big}"), "big");
    assert_eq!(content("<{if: 1 > 2}{big}>"), "<>");
    assert_eq!(content("{if: a == a}{{upper: loud}}{quiet}"), "LOUD");
}

#[test]
fn trailing_branches_can_carry_embed_tags() {
    let out = run("{embed}{if: 2 < 1}{{title: Small}}{{title: Big}}");
    assert_eq!(out.embeds[0].title.as_deref(), Some("Big"));
}

#[test]
fn if_branches_can_carry_embed_tags() {
    let out = run("{embed}{if: 1 < 2 && {title: Small} && {title: Big}}");
    assert_eq!(out.embeds.len(), 1);
    assert_eq!(out.embeds[0].title.as_deref(), Some("Small"));
}

#[test]
fn if_with_bad_number_propagates() {
    let err = render_with("{if: many > 3 && a && b}", &Context::default(), &fixed()).unwrap_err();
    assert!(matches!(err, ScriptError::NumericParse { .. }));
}

#[test]
fn message_sets_content_alongside_embeds() {
    let out = run("{message: Look!}{embed}{title: Hi}");
    assert_eq!(out.content.as_deref(), Some("Look!"));
    assert_eq!(out.embeds.len(), 1);
}

#[test]
fn buttons_keep_order_and_unset_words() {
    let out = run("{button: https://example.com && Label && 🔥}{button: https://b.io && null && off}");
    assert_eq!(
        out.buttons,
        vec![
            LinkButtonSpec {
                url: "https://example.com".into(),
                label: Some("Label".into()),
                emoji: Some("🔥".into())
            },
            LinkButtonSpec { url: "https://b.io".into(), label: None, emoji: None },
        ]
    );
    assert_eq!(out.content, None);
}

#[test]
fn url_alias_belongs_to_button() {
    // Content tags run first, so `{url: ...}` never reaches the embed set.
    let out = run("{embed}{title: T}{url: https://x.io}");
    assert_eq!(out.buttons.len(), 1);
    assert_eq!(out.embeds[0].url, None);
    assert_eq!(run("{embed}{uri: https://x.io}").embeds[0].url.as_deref(), Some("https://x.io"));
}

// --- Embed tags --------------------------------------------------------------

#[test]
fn color_keywords_and_failures() {
    assert_eq!(run("{embed}{colour: #00ff00}").embeds[0].color, Some(0x00FF00));
    assert_eq!(run("{embed}{c: blurple}").embeds[0].color, Some(0x5865F2));

    // An unresolvable color sets nothing, so the embed stays empty.
    let out = run("{embed}{color: #1000000}");
    assert!(out.embeds.is_empty());
    assert_eq!(out.content.as_deref(), Some("{embed}{color: #1000000}"));
}

#[test]
fn author_icon_rules() {
    let plain = run("{embed}{author: Ann && https://cdn.x.io/a.png && https://x.io}");
    assert_eq!(
        plain.embeds[0].author,
        Some(EmbedAuthor {
            name: "Ann".into(),
            icon_url: Some("https://cdn.x.io/a.png".into()),
            url: Some("https://x.io".into())
        })
    );

    let link = run("{embed}{a: Ann && https://x.io/profile}");
    let author = link.embeds[0].author.clone().unwrap();
    assert_eq!(author.icon_url, None);
    assert_eq!(author.url.as_deref(), Some("https://x.io/profile"));

    let off = run("{embed}{author: Ann && off && https://x.io}");
    let author = off.embeds[0].author.clone().unwrap();
    assert_eq!(author.icon_url, None);
    assert_eq!(author.url.as_deref(), Some("https://x.io"));
}

#[test]
fn fields_append_with_inline_flag() {
    let out = run("{embed}{field: A && 1}{field: B && 2 && false}{field: C && 3 && no}");
    let inline: Vec<bool> = out.embeds[0].fields.iter().map(|f| f.inline).collect();
    assert_eq!(inline, [true, false, false]);
    assert_eq!(out.embeds[0].fields[1].name, "B");
    assert_eq!(out.embeds[0].fields[1].value, "2");
}

#[test]
fn media_footer_and_description() {
    let out = run(
        "{embed}{thumb: https://x.io/t.png}{img: https://x.io/i.png}{desc: Body}{footer: Bye && https://x.io/f.png}",
    );
    let embed = &out.embeds[0];
    assert_eq!(embed.thumbnail.as_deref(), Some("https://x.io/t.png"));
    assert_eq!(embed.image.as_deref(), Some("https://x.io/i.png"));
    assert_eq!(embed.description.as_deref(), Some("Body"));
    assert_eq!(
        embed.footer,
        Some(EmbedFooter { text: "Bye".into(), icon_url: Some("https://x.io/f.png".into()) })
    );
}

#[test]
fn short_aliases_follow_last_registration() {
    let out = run("{embed}{t}{f: small print}");
    let embed = &out.embeds[0];
    assert_eq!(embed.timestamp, fixed().now);
    assert_eq!(embed.title, None);
    assert_eq!(embed.footer.as_ref().map(|f| f.text.as_str()), Some("small print"));
    assert!(embed.fields.is_empty());
}

#[test]
fn timestamp_defaults_to_compile_clock() {
    let now = fixed().now;
    assert_eq!(run("{embed}{timestamp}").embeds[0].timestamp, now);
    assert_eq!(run("{embed}{timestamp: Today}").embeds[0].timestamp, now);
}

#[test]
fn timestamp_reads_english_dates() {
    let out = run("{embed}{timestamp: 2024-05-03}");
    let parsed = out.embeds[0].timestamp.unwrap();
    assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());

    let unparsed = run("{embed}{title: x}{timestamp: whenever you like}");
    assert_eq!(unparsed.embeds[0].timestamp, None);
}

#[test]
fn missing_required_parameter_names_both() {
    let err = render_with("{embed}{field: OnlyName}", &Context::default(), &fixed()).unwrap_err();
    match err {
        ScriptError::MissingParameter { tag, parameter } => assert_eq!((tag, parameter), ("field", "value")),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = render_with("{strip: text}", &Context::default(), &fixed()).unwrap_err();
    assert_eq!(err.to_string(), "The **strip** method requires the `removal` parameter");
}
