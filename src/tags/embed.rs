//! Embed tags.
//!
//! Each tag sets one attribute of the embed currently open in the [`Scope`]
//! and expands to nothing. Attributes set twice keep the last value, except
//! `field`, which appends.
//!
//! Short aliases overlap: `t` is claimed by `title`, `thumbnail` and
//! `timestamp`, and `f` by `field` and `footer`. The registry keeps the last
//! registration (`timestamp`, `footer`) and reports the others through
//! `tagscript::diagnostics()`.

use chrono_english::{Dialect, parse_date_string};

use super::color;
use super::helpers::is_icon_off;
use crate::engine::Scope;
use crate::payload::{EmbedAuthor, EmbedField, EmbedFooter};
use crate::{Args, TagDefinition, TagResult};

/// Embed tags in registration order.
pub(crate) fn definitions() -> Vec<TagDefinition> {
    vec![
        tag! { name: "color", aliases: ["colour", "c"], params: [param!(value)], call: set_color },
        tag! {
            name: "author",
            aliases: ["a"],
            params: [param!(name), param!(icon_url?), param!(url?)],
            call: set_author,
        },
        tag! { name: "url", aliases: ["uri", "u"], params: [param!(value)], call: set_url },
        tag! { name: "title", aliases: ["t"], params: [param!(value)], call: set_title },
        tag! { name: "description", aliases: ["desc", "d"], params: [param!(value)], call: set_description },
        tag! {
            name: "field",
            aliases: ["f"],
            params: [param!(name), param!(value), param!(inline = "true")],
            call: add_field,
        },
        tag! { name: "thumbnail", aliases: ["thumb", "t"], params: [param!(url?)], call: set_thumbnail },
        tag! { name: "image", aliases: ["img", "i"], params: [param!(url?)], call: set_image },
        tag! { name: "footer", aliases: ["f"], params: [param!(text), param!(icon_url?)], call: set_footer },
        tag! { name: "timestamp", aliases: ["t"], params: [param!(value = "now")], call: set_timestamp },
    ]
}

fn set_color(scope: &mut Scope, args: &Args) -> TagResult {
    let resolved = color::resolve(args.text(0), scope.rng());
    if resolved.is_none() {
        tracing::trace!(value = args.text(0), "not a color; left unset");
    }
    scope.embed.color = resolved;
    Ok(String::new())
}

/// An icon that is a link but not an image is taken as the author's link.
fn set_author(scope: &mut Scope, args: &Args) -> TagResult {
    let mut icon_url = args.get(1).filter(|icon| !icon.is_empty()).map(str::to_string);
    let mut url = args.get(2).filter(|url| !url.is_empty()).map(str::to_string);

    if let Some(icon) = icon_url.take().filter(|icon| !is_icon_off(icon)) {
        let is_image = regex!(r"(?i)^(?:http:|https:)?//.*\.(?:png|jpg|jpeg|webp|gif)").is_match(&icon);
        let link = regex!(r"^(?:http:|https:)?//\S*").find(&icon).map(|m| m.as_str().to_string());
        match link {
            Some(link) if !is_image => url = Some(link),
            _ => icon_url = Some(icon),
        }
    }

    scope.embed.author = Some(EmbedAuthor { name: args.text(0).to_string(), icon_url, url });
    Ok(String::new())
}

fn set_url(scope: &mut Scope, args: &Args) -> TagResult {
    scope.embed.url = Some(args.text(0).to_string());
    Ok(String::new())
}

fn set_title(scope: &mut Scope, args: &Args) -> TagResult {
    scope.embed.title = Some(args.text(0).to_string());
    Ok(String::new())
}

fn set_description(scope: &mut Scope, args: &Args) -> TagResult {
    scope.embed.description = Some(args.text(0).to_string());
    Ok(String::new())
}

fn add_field(scope: &mut Scope, args: &Args) -> TagResult {
    scope.embed.fields.push(EmbedField {
        name: args.text(0).to_string(),
        value: args.text(1).to_string(),
        inline: inline(args.text(2)),
    });
    Ok(String::new())
}

fn inline(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    !matches!(lowered.as_str(), "" | "false" | "no" | "off" | "null" | "none")
}

fn set_thumbnail(scope: &mut Scope, args: &Args) -> TagResult {
    scope.embed.thumbnail = media(args);
    Ok(String::new())
}

fn set_image(scope: &mut Scope, args: &Args) -> TagResult {
    scope.embed.image = media(args);
    Ok(String::new())
}

fn media(args: &Args) -> Option<String> {
    args.get(0).filter(|url| !url.is_empty()).map(str::to_string)
}

fn set_footer(scope: &mut Scope, args: &Args) -> TagResult {
    scope.embed.footer = Some(EmbedFooter {
        text: args.text(0).to_string(),
        icon_url: args.get(1).filter(|icon| !icon.is_empty()).map(str::to_string),
    });
    Ok(String::new())
}

/// `now`, `current` and `today` mean the compile clock; anything else is read
/// as an English date relative to it ("tomorrow", "2 hours ago",
/// "2024-05-01"). Unparseable dates leave the timestamp unset.
fn set_timestamp(scope: &mut Scope, args: &Args) -> TagResult {
    let value = args.text(0).trim();
    scope.embed.timestamp = match value.to_lowercase().as_str() {
        "now" | "current" | "today" => Some(scope.now),
        _ => match parse_date_string(value, scope.now, Dialect::Us) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::debug!(value, error = ?err, "could not parse timestamp");
                None
            }
        },
    };
    Ok(String::new())
}
