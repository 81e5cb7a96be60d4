//! Per-compilation working state.
//!
//! Every compilation owns exactly one `Scope`; nothing in it is shared across
//! calls. Tag callbacks receive it mutably and record their side effects
//! here: the `message` override, link buttons, and attributes of the embed
//! currently being built.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::Options;
use crate::payload::{EmbedPayload, LinkButtonSpec, MessagePayload};

#[derive(Debug)]
pub(crate) struct Scope {
    /// Set by the `message` tag.
    pub content: Option<String>,
    /// The open embed; only embed tags touch it.
    pub embed: EmbedPayload,
    pub embeds: Vec<EmbedPayload>,
    pub buttons: Vec<LinkButtonSpec>,
    /// Reference clock for `timestamp`.
    pub now: DateTime<Utc>,
    pub tag_calls: usize,
    rng: StdRng,
}

impl Scope {
    pub fn new(options: &Options) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Scope {
            content: None,
            embed: EmbedPayload::default(),
            embeds: Vec::new(),
            buttons: Vec::new(),
            now: options.now.unwrap_or_else(Utc::now),
            tag_calls: 0,
            rng,
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Start accumulating a fresh embed, discarding whatever was open.
    pub fn open_embed(&mut self) {
        self.embed = EmbedPayload::default();
    }

    /// Move the open embed into the committed list unless it is empty.
    /// Returns whether anything was committed.
    pub fn commit_embed(&mut self) -> bool {
        let embed = std::mem::take(&mut self.embed);
        if embed.is_empty() {
            return false;
        }
        tracing::debug!(index = self.embeds.len(), fields = embed.fields.len(), "committed embed");
        self.embeds.push(embed);
        true
    }

    /// Whether any tag produced message output.
    pub fn produced(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty()) || !self.embeds.is_empty() || !self.buttons.is_empty()
    }

    /// Assemble the final payload. `resolved` becomes the content verbatim
    /// when no tag produced anything.
    pub fn into_payload(self, resolved: String) -> MessagePayload {
        let content = if self.produced() { self.content.filter(|c| !c.is_empty()) } else { Some(resolved) };
        MessagePayload { content, embeds: self.embeds, buttons: self.buttons }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_embeds_are_not_committed() {
        let mut scope = Scope::new(&Options::default());
        scope.open_embed();
        assert!(!scope.commit_embed());

        scope.open_embed();
        scope.embed.title = Some("A".into());
        assert!(scope.commit_embed());
        assert_eq!(scope.embeds.len(), 1);
        assert!(scope.embed.is_empty());
    }

    #[test]
    fn nothing_produced_falls_back_to_resolved_text() {
        let scope = Scope::new(&Options::default());
        let payload = scope.into_payload("plain".into());
        assert_eq!(payload.content.as_deref(), Some("plain"));
    }

    #[test]
    fn empty_message_override_does_not_count() {
        let mut scope = Scope::new(&Options::default());
        scope.content = Some(String::new());
        assert!(!scope.produced());
    }
}
