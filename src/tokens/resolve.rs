//! Variable resolution.
//!
//! ```text
//! Context ──▶ bind tables for present keys ──▶ token -> value map
//! script  ──────────────────────────────────▶ one pass over `{...}` tokens
//! ```
//!
//! Only keys present in the context contribute bindings, so placeholders of
//! absent namespaces survive byte-for-byte. Replacement is a single scan over
//! brace-delimited tokens, which makes the outcome independent of table order.

use std::collections::HashMap;

use super::catalog::{self, Placeholder};
use crate::context::{Context, User};

/// Bindings collected from one `Context`.
#[derive(Debug, Default)]
pub(crate) struct Bindings {
    values: HashMap<String, String>,
}

impl Bindings {
    pub fn from_context(context: &Context) -> Self {
        let mut b = Bindings::default();

        if let Some(guild) = &context.guild {
            b.bind("guild", &catalog::GUILD, guild);
        }
        if let Some(channel) = &context.channel {
            b.bind("channel", &catalog::CHANNEL, channel);
        }
        if let Some(role) = &context.role {
            b.bind("role", &catalog::ROLE, role);
        }
        if let Some(roles) = context.roles.as_ref().filter(|r| !r.is_empty()) {
            let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
            b.set("{roles}", names.join(" "));
        }
        if let Some(user) = &context.user {
            b.bind_user("user", user);
            b.bind_user("member", user);
        }
        if let Some(moderator) = &context.moderator {
            b.bind_user("moderator", moderator);
        }
        if let Some(case_id) = context.case_id {
            for token in ["{case}", "{case.id}", "{case_id}"] {
                b.set(token, case_id.to_string());
            }
        }

        let scalars = [
            ("{reason}", &context.reason),
            ("{duration}", &context.duration),
            ("{image}", &context.image),
            ("{option}", &context.option),
            ("{text}", &context.text),
            ("{name}", &context.name),
            ("{color}", &context.color),
            ("{colour}", &context.color),
        ];
        for (token, value) in scalars {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                b.set(token, value.to_string());
            }
        }

        if let Some(emoji) = &context.emoji {
            b.bind("emoji", &catalog::EMOJI, emoji);
        }
        if let Some(emojis) = context.emojis.as_ref().filter(|e| !e.is_empty()) {
            let rendered: Vec<String> = emojis.iter().map(ToString::to_string).collect();
            b.set("{emojis}", rendered.join(" "));
        }
        if let Some(sticker) = &context.sticker {
            b.bind("sticker", &catalog::STICKER, sticker);
        }
        if let Some(hoist) = context.hoist {
            let flag = super::format::yes_no(hoist);
            b.set("{hoist}", flag.to_string());
            b.set("{hoisted}", flag.to_string());
        }
        if let Some(mentionable) = context.mentionable {
            b.set("{mentionable}", super::format::yes_no(mentionable).to_string());
        }
        if let Some(now_playing) = &context.now_playing {
            b.bind("", &catalog::NOW_PLAYING, now_playing);
        }
        if let Some(video) = &context.video {
            b.bind("youtube", &catalog::VIDEO, video);
        }

        b
    }

    fn bind<T>(&mut self, namespace: &str, table: &[Placeholder<T>], value: &T) {
        for entry in table {
            self.values.insert(entry.token(namespace), (entry.render)(value));
        }
    }

    fn bind_user(&mut self, namespace: &str, user: &User) {
        self.bind(namespace, &catalog::USER, user);
        if let Some(member) = &user.member {
            self.bind(namespace, &catalog::MEMBER, member);
        }
    }

    fn set(&mut self, token: &str, value: String) {
        self.values.insert(token.to_string(), value);
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Substitute every placeholder bound by `context` in `script`.
///
/// Never fails: unknown or unbound placeholders are returned unchanged.
pub(crate) fn resolve(script: &str, context: &Context) -> String {
    let bindings = Bindings::from_context(context);
    if bindings.is_empty() {
        return script.to_string();
    }

    // Without the crown the placeholder disappears together with the code
    // span it is usually wrapped in.
    let script = match &context.now_playing {
        Some(np) if !np.artist.crown => script.replace("`{artist.crown}`", ""),
        _ => script.to_string(),
    };

    let out = regex!(r"\{[^{}]*\}").replace_all(&script, |caps: &regex::Captures<'_>| {
        let token = &caps[0];
        match bindings.get(token) {
            Some(value) => value.to_string(),
            None => {
                tracing::trace!(token, "placeholder left unresolved");
                token.to_string()
            }
        }
    });

    tracing::debug!(bindings = bindings.len(), "resolved variables");
    out.into_owned()
}
