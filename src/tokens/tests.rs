use chrono::{TimeZone, Utc};

use super::resolve;
use crate::context::{Album, Artist, Context, Guild, MemberInfo, NowPlaying, Role, Track, User, Video, VideoChannel};

fn guild() -> Guild {
    Guild {
        id: 42,
        name: "Lounge".into(),
        member_count: 12_345,
        created_at: Utc.with_ymd_and_hms(2020, 1, 2, 9, 5, 0).unwrap(),
        ..Default::default()
    }
}

fn user() -> User {
    User {
        id: 7,
        name: "ann".into(),
        discriminator: "0".into(),
        display_name: "Annie".into(),
        created_at: Utc.with_ymd_and_hms(2019, 6, 1, 18, 30, 0).unwrap(),
        ..Default::default()
    }
}

#[test]
fn empty_context_is_identity() {
    let script = "{user} joined {guild.name} because {reason}";
    assert_eq!(resolve(script, &Context::default()), script);
}

#[test]
fn absent_namespaces_survive_untouched() {
    let ctx = Context::new().with_user(user());
    let out = resolve("hi {user.mention}, reason: {reason} in {guild}", &ctx);
    assert_eq!(out, "hi <@7>, reason: {reason} in {guild}");
}

#[test]
fn guild_counts_and_dates() {
    let ctx = Context::new().with_guild(guild());
    let out = resolve("{guild.count} | {guild.created_at} | {guild.icon} | {guild.banner}", &ctx);
    assert_eq!(
        out,
        "12,345 | 01/02/2020, 09:05 AM | https://cdn.discordapp.com/embed/avatars/1.png | No banner"
    );

    let unix = resolve("{unix(guild.created_at)}", &ctx);
    assert_eq!(unix, Utc.with_ymd_and_hms(2020, 1, 2, 9, 5, 0).unwrap().timestamp().to_string());
}

#[test]
fn member_namespace_aliases_user() {
    let ctx = Context::new().with_user(user());
    assert_eq!(resolve("{member.nick} / {user.nick} / {member}", &ctx), "Annie / Annie / ann");
}

#[test]
fn member_only_fields_need_membership() {
    let ctx = Context::new().with_user(user());
    assert_eq!(resolve("{user.joined_at}", &ctx), "{user.joined_at}");

    let mut member = user();
    member.member = Some(MemberInfo {
        joined_at: Utc.with_ymd_and_hms(2022, 12, 24, 0, 0, 0).unwrap(),
        premium_since: None,
        join_position: Some(3),
    });
    let ctx = Context::new().with_moderator(member);
    let out = resolve("{moderator.joined_at} {suffix(moderator.join_position)} {moderator.boosted_at}", &ctx);
    assert_eq!(out, "12/24/2022, 12:00 AM 3rd Never");
}

#[test]
fn scalars_and_flags() {
    let ctx = Context {
        case_id: Some(19),
        reason: Some("spam".into()),
        hoist: Some(true),
        mentionable: Some(false),
        roles: Some(vec![
            Role { name: "red".into(), ..Default::default() },
            Role { name: "blue".into(), ..Default::default() },
        ]),
        ..Default::default()
    };
    let out = resolve("#{case} ({case.id}) {reason} {hoisted} {mentionable} {roles}", &ctx);
    assert_eq!(out, "#19 (19) spam Yes No red blue");
}

#[test]
fn now_playing_without_crown_drops_code_span() {
    let np = NowPlaying {
        artist: Artist { name: "Big_Band".into(), plays: 1200, crown: false, ..Default::default() },
        album: None,
        track: Track { name: "song".into(), ..Default::default() },
        ..Default::default()
    };
    let ctx = Context { now_playing: Some(np), ..Default::default() };
    let out = resolve("{artist} `{artist.crown}` {artist.plays} [{album}] {upper(track)}", &ctx);
    assert_eq!(out, "Big\\_Band  1,200 [] SONG");
}

#[test]
fn now_playing_with_crown_and_album() {
    let np = NowPlaying {
        artist: Artist { name: "x".into(), crown: true, ..Default::default() },
        album: Some(Album { name: "in rainbows".into(), ..Default::default() }),
        ..Default::default()
    };
    let ctx = Context { now_playing: Some(np), ..Default::default() };
    assert_eq!(resolve("{artist.crown} {title(album)}", &ctx), "\u{1F451} In Rainbows");
}

#[test]
fn video_namespace() {
    let video = Video {
        id: "abc".into(),
        title: "Clip".into(),
        url: "https://youtu.be/abc".into(),
        channel: VideoChannel { name: "Chan".into(), ..Default::default() },
    };
    let ctx = Context { video: Some(video), ..Default::default() };
    assert_eq!(resolve("{youtube} by {youtube.channel} ({youtube.url})", &ctx), "Clip by Chan (https://youtu.be/abc)");
}

#[test]
fn tag_calls_are_not_placeholders() {
    let ctx = Context::new().with_user(user());
    assert_eq!(resolve("{upper: {user.name}}", &ctx), "{upper: ann}");
}
