//! Placeholder catalog.
//!
//! One table per context kind. Each entry maps a placeholder pattern to the
//! function that renders it from the context record. In patterns, `$` stands
//! for the namespace the table is bound under, so the same user table serves
//! `{user.id}`, `{member.id}` and `{moderator.id}`.
//!
//! Tables only *describe* substitutions; `resolve.rs` decides which tables
//! apply for a given `Context` and performs a single replacement pass.

use once_cell::sync::Lazy;

use super::format::{comma, escape_markdown, hex_color, human_date, ordinal, title_case, unix, yes_no};
use crate::context::{
    Channel, DEFAULT_GUILD_ICON, Emoji, Guild, MemberInfo, NowPlaying, Role, Sticker, User, Video,
};

/// Rendered in place of `{artist.crown}` when the listener holds the crown.
pub(crate) const CROWN: &str = "\u{1F451}";

pub(crate) struct Placeholder<T> {
    pub pattern: &'static str,
    pub render: fn(&T) -> String,
}

impl<T> Placeholder<T> {
    /// The literal token for this entry under `namespace`.
    pub fn token(&self, namespace: &str) -> String {
        self.pattern.replace('$', namespace)
    }
}

macro_rules! placeholders {
    ($ty:ty, |$v:ident| { $($pattern:literal => $render:expr),* $(,)? }) => {
        vec![ $( Placeholder::<$ty> { pattern: $pattern, render: |$v: &$ty| -> String { $render.to_string() } } ),* ]
    };
}

pub(crate) static GUILD: Lazy<Vec<Placeholder<Guild>>> = Lazy::new(|| {
    placeholders!(Guild, |g| {
        "{$}" => g.name,
        "{$.id}" => g.id,
        "{$.name}" => g.name,
        "{$.icon}" => g.icon.as_deref().unwrap_or(DEFAULT_GUILD_ICON),
        "{$.banner}" => g.banner.as_deref().unwrap_or("No banner"),
        "{$.splash}" => g.splash.as_deref().unwrap_or("No splash"),
        "{$.discovery_splash}" => g.discovery_splash.as_deref().unwrap_or("No discovery splash"),
        "{$.owner}" => g.owner,
        "{$.owner_id}" => g.owner_id,
        "{$.count}" => comma(g.member_count),
        "{$.members}" => comma(g.member_count),
        "{len($.members)}" => comma(g.member_count),
        "{$.channels}" => comma(g.channel_count),
        "{$.channel_count}" => comma(g.channel_count),
        "{$.category_channels}" => comma(g.category_count),
        "{$.category_channel_count}" => comma(g.category_count),
        "{$.text_channels}" => comma(g.text_channel_count),
        "{$.text_channel_count}" => comma(g.text_channel_count),
        "{$.voice_channels}" => comma(g.voice_channel_count),
        "{$.voice_channel_count}" => comma(g.voice_channel_count),
        "{$.roles}" => comma(g.role_count),
        "{$.role_count}" => comma(g.role_count),
        "{$.emojis}" => comma(g.emoji_count),
        "{$.emoji_count}" => comma(g.emoji_count),
        "{$.created_at}" => human_date(&g.created_at),
        "{unix($.created_at)}" => unix(&g.created_at),
    })
});

pub(crate) static CHANNEL: Lazy<Vec<Placeholder<Channel>>> = Lazy::new(|| {
    placeholders!(Channel, |c| {
        "{$}" => c.name,
        "{$.id}" => c.id,
        "{$.mention}" => c.mention(),
        "{$.name}" => c.name,
        "{$.topic}" => c.topic.as_deref().unwrap_or("None"),
        "{$.created_at}" => human_date(&c.created_at),
        "{unix($.created_at)}" => unix(&c.created_at),
    })
});

pub(crate) static ROLE: Lazy<Vec<Placeholder<Role>>> = Lazy::new(|| {
    placeholders!(Role, |r| {
        "{$}" => r.name,
        "{$.id}" => r.id,
        "{$.mention}" => r.mention(),
        "{$.name}" => r.name,
        "{$.color}" => hex_color(r.color),
        "{$.created_at}" => human_date(&r.created_at),
        "{unix($.created_at)}" => unix(&r.created_at),
    })
});

pub(crate) static USER: Lazy<Vec<Placeholder<User>>> = Lazy::new(|| {
    placeholders!(User, |u| {
        "{$}" => u.display(),
        "{$.id}" => u.id,
        "{$.mention}" => u.mention(),
        "{$.name}" => u.name,
        "{$.tag}" => u.discriminator,
        "{$.bot}" => yes_no(u.bot),
        "{$.color}" => hex_color(u.color),
        "{$.avatar}" => u.avatar,
        "{$.nickname}" => u.display_name,
        "{$.nick}" => u.display_name,
        "{$.created_at}" => human_date(&u.created_at),
        "{unix($.created_at)}" => unix(&u.created_at),
    })
});

/// Entries that only exist for guild members; bound under the same namespace
/// as the owning user.
pub(crate) static MEMBER: Lazy<Vec<Placeholder<MemberInfo>>> = Lazy::new(|| {
    placeholders!(MemberInfo, |m| {
        "{$.joined_at}" => human_date(&m.joined_at),
        "{unix($.joined_at)}" => unix(&m.joined_at),
        "{$.join_position}" => m.join_position.map(|p| p.to_string()).unwrap_or_default(),
        "{suffix($.join_position)}" => m.join_position.map(ordinal).unwrap_or_default(),
        "{$.boost}" => yes_no(m.premium_since.is_some()),
        "{$.boosted_at}" => m.premium_since.as_ref().map_or_else(|| "Never".to_string(), human_date),
        "{unix($.boosted_at)}" => m.premium_since.as_ref().map_or_else(|| "Never".to_string(), unix),
        "{$.boost_since}" => m.premium_since.as_ref().map_or_else(|| "Never".to_string(), human_date),
        "{unix($.boost_since)}" => m.premium_since.as_ref().map_or_else(|| "Never".to_string(), unix),
    })
});

pub(crate) static EMOJI: Lazy<Vec<Placeholder<Emoji>>> = Lazy::new(|| {
    placeholders!(Emoji, |e| {
        "{$}" => e,
        "{$.id}" => e.id,
        "{$.name}" => e.name,
        "{$.animated}" => yes_no(e.animated),
        "{$.url}" => e.url,
    })
});

pub(crate) static STICKER: Lazy<Vec<Placeholder<Sticker>>> = Lazy::new(|| {
    placeholders!(Sticker, |s| {
        "{$}" => s.name,
        "{$.id}" => s.id,
        "{$.name}" => s.name,
        "{$.animated}" => yes_no(s.animated),
        "{$.url}" => s.url,
    })
});

/// Now-playing placeholders span several namespaces, so patterns are written
/// out in full and bound without a namespace.
pub(crate) static NOW_PLAYING: Lazy<Vec<Placeholder<NowPlaying>>> = Lazy::new(|| {
    placeholders!(NowPlaying, |np| {
        "{lastfm}" => np.user.username,
        "{lastfm.name}" => np.user.username,
        "{lastfm.url}" => np.user.url,
        "{lastfm.avatar}" => np.user.avatar.as_deref().unwrap_or(""),
        "{lastfm.plays}" => comma(np.user.scrobbles),
        "{lastfm.scrobbles}" => comma(np.user.scrobbles),
        "{lastfm.library}" => comma(np.user.scrobbles),
        "{lastfm.library.artists}" => comma(np.user.artists),
        "{lastfm.library.albums}" => comma(np.user.albums),
        "{lastfm.library.tracks}" => comma(np.user.tracks),
        "{artist}" => escape_markdown(&np.artist.name),
        "{artist.name}" => escape_markdown(&np.artist.name),
        "{artist.url}" => np.artist.url,
        "{artist.image}" => np.artist.image.as_deref().unwrap_or(""),
        "{artist.plays}" => comma(np.artist.plays),
        "{artist.crown}" => if np.artist.crown { CROWN } else { "" },
        "{album}" => album_text(np, |name| escape_markdown(name)),
        "{album.name}" => album_text(np, |name| escape_markdown(name)),
        "{album.url}" => np.album.as_ref().map(|a| a.url.as_str()).unwrap_or(""),
        "{album.image}" => np.album.as_ref().and_then(|a| a.image.as_deref()).unwrap_or(""),
        "{album.cover}" => np.album.as_ref().and_then(|a| a.image.as_deref()).unwrap_or(""),
        "{album.plays}" => np.album.as_ref().map(|a| comma(a.plays)).unwrap_or_default(),
        "{track}" => escape_markdown(&np.track.name),
        "{track.name}" => escape_markdown(&np.track.name),
        "{track.url}" => np.track.url,
        "{track.image}" => np.track.image.as_deref().unwrap_or(""),
        "{track.cover}" => np.track.image.as_deref().unwrap_or(""),
        "{track.plays}" => comma(np.track.plays),
        "{lower(artist)}" => escape_markdown(&np.artist.name.to_lowercase()),
        "{lower(artist.name)}" => escape_markdown(&np.artist.name.to_lowercase()),
        "{lower(album)}" => album_text(np, |name| escape_markdown(&name.to_lowercase())),
        "{lower(album.name)}" => album_text(np, |name| escape_markdown(&name.to_lowercase())),
        "{lower(track)}" => escape_markdown(&np.track.name.to_lowercase()),
        "{lower(track.name)}" => escape_markdown(&np.track.name.to_lowercase()),
        "{upper(artist)}" => escape_markdown(&np.artist.name.to_uppercase()),
        "{upper(artist.name)}" => escape_markdown(&np.artist.name.to_uppercase()),
        "{upper(album)}" => album_text(np, |name| escape_markdown(&name.to_uppercase())),
        "{upper(album.name)}" => album_text(np, |name| escape_markdown(&name.to_uppercase())),
        "{upper(track)}" => escape_markdown(&np.track.name.to_uppercase()),
        "{upper(track.name)}" => escape_markdown(&np.track.name.to_uppercase()),
        "{title(artist)}" => escape_markdown(&title_case(&np.artist.name)),
        "{title(artist.name)}" => escape_markdown(&title_case(&np.artist.name)),
        "{title(album)}" => album_text(np, |name| escape_markdown(&title_case(name))),
        "{title(album.name)}" => album_text(np, |name| escape_markdown(&title_case(name))),
        "{title(track)}" => escape_markdown(&title_case(&np.track.name)),
        "{title(track.name)}" => escape_markdown(&title_case(&np.track.name)),
    })
});

pub(crate) static VIDEO: Lazy<Vec<Placeholder<Video>>> = Lazy::new(|| {
    placeholders!(Video, |v| {
        "{$}" => v.title,
        "{$.title}" => v.title,
        "{$.url}" => v.url,
        "{$.id}" => v.id,
        "{$.channel}" => v.channel.name,
        "{$.channel.name}" => v.channel.name,
        "{$.channel.url}" => v.channel.url,
        "{$.channel.id}" => v.channel.id,
    })
});

fn album_text(np: &NowPlaying, render: impl Fn(&str) -> String) -> String {
    np.album.as_ref().map(|a| render(&a.name)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique<T>(table: &[Placeholder<T>]) {
        let mut seen = HashSet::new();
        for entry in table {
            assert!(seen.insert(entry.pattern), "duplicate placeholder {}", entry.pattern);
            assert!(entry.pattern.starts_with('{') && entry.pattern.ends_with('}'));
        }
    }

    #[test]
    fn tables_have_unique_braced_patterns() {
        assert_unique(&GUILD);
        assert_unique(&CHANNEL);
        assert_unique(&ROLE);
        assert_unique(&USER);
        assert_unique(&MEMBER);
        assert_unique(&EMOJI);
        assert_unique(&STICKER);
        assert_unique(&NOW_PLAYING);
        assert_unique(&VIDEO);
    }

    #[test]
    fn token_expands_namespace() {
        let entry = USER.iter().find(|p| p.pattern == "{unix($.created_at)}").unwrap();
        assert_eq!(entry.token("moderator"), "{unix(moderator.created_at)}");
    }

    #[test]
    fn member_entries_default_to_never() {
        let member = MemberInfo::default();
        let boosted = MEMBER.iter().find(|p| p.pattern == "{$.boosted_at}").unwrap();
        assert_eq!((boosted.render)(&member), "Never");

        let suffix = MEMBER.iter().find(|p| p.pattern == "{suffix($.join_position)}").unwrap();
        let member = MemberInfo { join_position: Some(22), ..Default::default() };
        assert_eq!((suffix.render)(&member), "22nd");
    }
}
