use crate::engine::{self, CONTENT_TAGS, CompileMetrics, EMBED_TAGS};
use crate::send::{self, Destination, SendOptions};
use crate::{Context, MessagePayload, ScriptError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Options that affect compilation.
///
/// Both fields default to "live" behavior. Fix them to make a compilation
/// fully reproducible (tests, previews, the CLI's `--now`/`--seed`).
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Clock used by `{timestamp}` and as the reference for natural-language
    /// dates. Defaults to the current time.
    pub now: Option<DateTime<Utc>>,
    /// Seed for `{random: ...}` and `{color: random}`. Defaults to OS entropy.
    pub seed: Option<u64>,
}

/// How a compiled script will be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompiledType {
    #[default]
    Text,
    Embed,
}

impl CompiledType {
    pub fn of(payload: &MessagePayload) -> Self {
        if payload.embeds.is_empty() { CompiledType::Text } else { CompiledType::Embed }
    }

    /// Human description used in feature replies.
    ///
    /// | suffix | bold  | Text                 | Embed                  |
    /// |--------|-------|----------------------|------------------------|
    /// | false  | any   | `text`               | `embed`                |
    /// | true   | true  | `a **text message**` | `an **embed message**` |
    /// | true   | false | `a text`             | `an embed`             |
    pub fn describe(self, suffix: bool, bold: bool) -> &'static str {
        match (self, suffix, bold) {
            (CompiledType::Text, false, _) => "text",
            (CompiledType::Text, true, true) => "a **text message**",
            (CompiledType::Text, true, false) => "a text",
            (CompiledType::Embed, false, _) => "embed",
            (CompiledType::Embed, true, true) => "an **embed message**",
            (CompiledType::Embed, true, false) => "an embed",
        }
    }
}

/// Output of a verbose compilation.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub payload: MessagePayload,
    pub kind: CompiledType,
    pub metrics: CompileMetrics,
}

/// An author-supplied script.
///
/// The source is immutable: every compilation works on its own copy, so a
/// script can be classified, rendered and rendered again with different
/// contexts without any state carrying over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    source: String,
    kind: Option<CompiledType>,
}

impl Script {
    pub fn new(source: impl Into<String>) -> Self {
        Script { source: source.into(), kind: None }
    }

    /// Parse and classify `source` without a context, surfacing authoring
    /// mistakes such as a missing required tag parameter.
    ///
    /// # Example
    /// ```
    /// use tagscript::{CompiledType, Script};
    ///
    /// let script = Script::validated("{embed}{title: Welcome}").unwrap();
    /// assert_eq!(script.kind(), CompiledType::Embed);
    ///
    /// let err = Script::validated("{embed}{field: OnlyName}").unwrap_err();
    /// assert_eq!(err.to_string(), "The **field** method requires the `value` parameter");
    /// ```
    pub fn validated(source: impl Into<String>) -> Result<Self, ScriptError> {
        let mut script = Script::new(source);
        script.kind = Some(script.classify()?);
        Ok(script)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The type recorded by [`Script::validated`]; `Text` for scripts that were
    /// never validated.
    pub fn kind(&self) -> CompiledType {
        self.kind.unwrap_or_default()
    }

    /// Compile with an empty context and report only the resulting type.
    /// Nothing produced here is visible to later compilations.
    pub fn classify(&self) -> Result<CompiledType, ScriptError> {
        classify(&self.source)
    }

    pub fn render(&self, context: &Context) -> Result<MessagePayload, ScriptError> {
        render(&self.source, context)
    }

    pub fn render_with(&self, context: &Context, options: &Options) -> Result<MessagePayload, ScriptError> {
        render_with(&self.source, context, options)
    }

    /// Render against `context` with `options` and hand the result to
    /// `destination`. Pass `&Options::default()` for the live clock and
    /// entropy.
    pub fn send<D>(
        &self,
        destination: &mut D,
        context: &Context,
        options: &Options,
        send_options: &SendOptions,
    ) -> Result<(), ScriptError>
    where
        D: Destination + ?Sized,
    {
        let payload = self.render_with(context, options)?;
        send::dispatch(destination, payload, send_options)
    }

    /// A copy of this script with every occurrence of `key` replaced.
    pub fn replace(&self, key: &str, value: &str) -> Script {
        Script { source: self.source.replace(key, value), kind: self.kind }
    }

    /// A copy of this script with surrounding whitespace removed.
    pub fn trimmed(&self) -> Script {
        Script { source: self.source.trim().to_string(), kind: self.kind }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Script {
    fn from(source: &str) -> Self {
        Script::new(source)
    }
}

impl From<String> for Script {
    fn from(source: String) -> Self {
        Script::new(source)
    }
}

/// Build both tag registries now instead of on first compilation.
pub fn warm_up() {
    let (content, embed) = (CONTENT_TAGS.len(), EMBED_TAGS.len());
    tracing::debug!(content, embed, "tag registries ready");
}

/// Compile `source` against `context` with live options.
///
/// # Example
/// ```
/// use tagscript::{Context, render};
///
/// let out = render("{embed}{color: red}{title: Hi}", &Context::default()).unwrap();
/// assert_eq!(out.content, None);
/// assert_eq!(out.embeds[0].color, Some(0xFF0000));
/// assert_eq!(out.embeds[0].title.as_deref(), Some("Hi"));
/// ```
pub fn render(source: &str, context: &Context) -> Result<MessagePayload, ScriptError> {
    render_with(source, context, &Options::default())
}

/// Compile `source` against `context` using the provided `options`.
pub fn render_with(source: &str, context: &Context, options: &Options) -> Result<MessagePayload, ScriptError> {
    engine::compile(source, context, options).map(|compiled| compiled.payload)
}

/// Compile and return the payload together with its type and metrics.
pub fn render_verbose(source: &str, context: &Context, options: &Options) -> Result<Compiled, ScriptError> {
    engine::compile(source, context, options)
}

/// Classify `source` without a context. The compiled payload is discarded.
pub fn classify(source: &str) -> Result<CompiledType, ScriptError> {
    engine::compile(source, &Context::default(), &Options::default()).map(|compiled| compiled.kind)
}
