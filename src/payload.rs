use chrono::{DateTime, Utc};
use serde::Serialize;

/// The destination-agnostic result of compiling a script.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<EmbedPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<LinkButtonSpec>,
}

impl MessagePayload {
    /// True when neither content, embeds nor buttons were produced.
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(str::is_empty) && self.embeds.is_empty() && self.buttons.is_empty()
    }
}

/// One rich message panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmbedPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl EmbedPayload {
    /// True when no attribute was ever given a value. Empty embeds are
    /// dropped instead of being committed.
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.author.is_none()
            && self.url.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.fields.is_empty()
            && self.thumbnail.is_none()
            && self.image.is_none()
            && self.footer.is_none()
            && self.timestamp.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// A link button attached below the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkButtonSpec {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}
