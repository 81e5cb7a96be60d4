//! Compilation context.
//!
//! A `Context` is the bag of real objects a feature hands to the compiler so
//! that placeholders like `{user.mention}` can be substituted. Every key is
//! optional: when a key is absent the placeholders of its namespace are left
//! in the script untouched.
//!
//! The record types below carry exactly what the placeholder catalog needs
//! (see `tokens/catalog.rs`). They deserialize from JSON so collaborators and
//! the CLI can supply a context without linking against any chat library.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The default avatar shown for guilds without an icon.
pub(crate) const DEFAULT_GUILD_ICON: &str = "https://cdn.discordapp.com/embed/avatars/1.png";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Context {
    pub guild: Option<Guild>,
    pub channel: Option<Channel>,
    pub role: Option<Role>,
    pub roles: Option<Vec<Role>>,
    pub user: Option<User>,
    pub moderator: Option<User>,
    pub case_id: Option<u64>,
    pub reason: Option<String>,
    pub duration: Option<String>,
    pub image: Option<String>,
    pub option: Option<String>,
    pub text: Option<String>,
    pub emoji: Option<Emoji>,
    pub emojis: Option<Vec<Emoji>>,
    pub sticker: Option<Sticker>,
    pub color: Option<String>,
    pub name: Option<String>,
    pub hoist: Option<bool>,
    pub mentionable: Option<bool>,
    pub now_playing: Option<NowPlaying>,
    pub video: Option<Video>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_guild(mut self, guild: Guild) -> Self {
        self.guild = Some(guild);
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_moderator(mut self, moderator: User) -> Self {
        self.moderator = Some(moderator);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Guild {
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
    pub banner: Option<String>,
    pub splash: Option<String>,
    pub discovery_splash: Option<String>,
    /// Display string of the owner (`name` or `name#discriminator`).
    pub owner: String,
    pub owner_id: u64,
    pub member_count: u64,
    pub channel_count: u64,
    pub category_count: u64,
    pub text_channel_count: u64,
    pub voice_channel_count: u64,
    pub role_count: u64,
    pub emoji_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub id: u64,
    pub name: String,
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Role {
    pub id: u64,
    pub name: String,
    pub color: u32,
    pub created_at: DateTime<Utc>,
}

impl Role {
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub name: String,
    /// Legacy four-digit discriminator; `"0"` for migrated usernames.
    pub discriminator: String,
    pub display_name: String,
    pub bot: bool,
    pub color: u32,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    /// Present when the user is a member of the guild being compiled for.
    pub member: Option<MemberInfo>,
}

impl User {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    /// `name`, or `name#discriminator` for accounts that still carry one.
    pub fn display(&self) -> String {
        match self.discriminator.as_str() {
            "" | "0" => self.name.clone(),
            disc => format!("{}#{}", self.name, disc),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MemberInfo {
    pub joined_at: DateTime<Utc>,
    pub premium_since: Option<DateTime<Utc>>,
    /// 1-based position in the guild's join order.
    pub join_position: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Emoji {
    pub id: u64,
    pub name: String,
    pub animated: bool,
    pub url: String,
}

impl std::fmt::Display for Emoji {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = if self.animated { "a" } else { "" };
        write!(f, "<{}:{}:{}>", prefix, self.name, self.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Sticker {
    pub id: u64,
    pub name: String,
    pub animated: bool,
    pub url: String,
}

/// What a listener is currently playing, as reported by a scrobbling service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NowPlaying {
    pub user: ListenerProfile,
    pub artist: Artist,
    pub album: Option<Album>,
    pub track: Track,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListenerProfile {
    pub username: String,
    pub url: String,
    pub avatar: Option<String>,
    pub scrobbles: u64,
    pub artists: u64,
    pub albums: u64,
    pub tracks: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub name: String,
    pub url: String,
    pub image: Option<String>,
    pub plays: u64,
    /// Whether the listener holds the crown for this artist.
    pub crown: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Album {
    pub name: String,
    pub url: String,
    pub image: Option<String>,
    pub plays: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Track {
    pub name: String,
    pub url: String,
    pub image: Option<String>,
    pub plays: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub url: String,
    pub channel: VideoChannel,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VideoChannel {
    pub id: String,
    pub name: String,
    pub url: String,
}
