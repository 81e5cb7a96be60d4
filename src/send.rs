//! Send adapter.
//!
//! Maps a compiled [`MessagePayload`] onto whatever accepts messages in the
//! host: a text channel, an existing message that gets edited, or a
//! webhook-backed identity. The adapter only shapes the outgoing message;
//! delivery itself (network, retries, timeouts) belongs to the destination.

use std::time::Duration;

use serde::Serialize;

use crate::{EmbedPayload, LinkButtonSpec, MessagePayload, ScriptError};

bitflags::bitflags! {
    /// Which mentions in the content are allowed to ping.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AllowedMentions: u8 {
        const EVERYONE      = 1 << 0;
        const USERS         = 1 << 1;
        const ROLES         = 1 << 2;
        const REPLIED_USER  = 1 << 3;
    }
}

impl Default for AllowedMentions {
    fn default() -> Self {
        AllowedMentions::USERS | AllowedMentions::ROLES | AllowedMentions::REPLIED_USER
    }
}

/// What a destination is, as far as sending is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    TextChannel,
    /// An already-sent message; delivering to it edits it in place.
    Message,
    /// A webhook or interaction response; the only kind that honors
    /// `ephemeral`.
    Webhook,
}

/// Whether the outgoing message creates a new message or edits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Send,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageReference {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Send-time options, orthogonal to the script.
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub delete_after: Option<Duration>,
    pub allowed_mentions: Option<AllowedMentions>,
    pub reference: Option<MessageReference>,
    pub ephemeral: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ButtonStyle {
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkButton {
    pub style: ButtonStyle,
    pub url: String,
    pub label: Option<String>,
    pub emoji: Option<String>,
}

impl From<LinkButtonSpec> for LinkButton {
    fn from(spec: LinkButtonSpec) -> Self {
        LinkButton { style: ButtonStyle::Link, url: spec.url, label: spec.label, emoji: spec.emoji }
    }
}

/// The interactive row holding a message's link buttons. Link buttons never
/// expire, so the view has no timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub buttons: Vec<LinkButton>,
}

/// Everything a destination needs to accept one message.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub delivery: Delivery,
    pub content: Option<String>,
    pub embeds: Vec<EmbedPayload>,
    pub view: Option<LinkView>,
    pub delete_after: Option<Duration>,
    pub allowed_mentions: Option<AllowedMentions>,
    pub reference: Option<MessageReference>,
    pub ephemeral: bool,
}

/// Something capable of accepting a compiled message.
pub trait Destination {
    fn kind(&self) -> DestinationKind;

    fn accept(&mut self, message: OutgoingMessage) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Shape `payload` for a destination of `kind`.
pub fn prepare(payload: MessagePayload, kind: DestinationKind, options: &SendOptions) -> OutgoingMessage {
    let view = if payload.buttons.is_empty() {
        None
    } else {
        Some(LinkView { buttons: payload.buttons.into_iter().map(LinkButton::from).collect() })
    };

    OutgoingMessage {
        delivery: if kind == DestinationKind::Message { Delivery::Edit } else { Delivery::Send },
        content: payload.content,
        embeds: payload.embeds,
        view,
        delete_after: options.delete_after,
        allowed_mentions: options.allowed_mentions,
        reference: options.reference,
        ephemeral: kind == DestinationKind::Webhook && options.ephemeral,
    }
}

pub(crate) fn dispatch<D>(destination: &mut D, payload: MessagePayload, options: &SendOptions) -> Result<(), ScriptError>
where
    D: Destination + ?Sized,
{
    let kind = destination.kind();
    let message = prepare(payload, kind, options);
    tracing::debug!(
        ?kind,
        delivery = ?message.delivery,
        embeds = message.embeds.len(),
        buttons = message.view.as_ref().map_or(0, |v| v.buttons.len()),
        "dispatching message"
    );
    destination.accept(message).map_err(ScriptError::Delivery)
}
