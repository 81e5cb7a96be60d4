extern crate self as tagscript;

#[macro_use]
mod macros;
mod api;
mod context;
mod engine;
mod error;
mod payload;
mod send;
mod tags;
mod tokens;

pub use api::{Compiled, CompiledType, Options, Script, classify, render, render_verbose, render_with, warm_up};
pub use context::{
    Album, Artist, Channel, Context, Emoji, Guild, ListenerProfile, MemberInfo, NowPlaying, Role, Sticker, Track,
    User, Video, VideoChannel,
};
pub use engine::{CompileMetrics, Diagnostic, Namespace, diagnostics};
pub use error::ScriptError;
pub use payload::{EmbedAuthor, EmbedField, EmbedFooter, EmbedPayload, LinkButtonSpec, MessagePayload};
pub use send::{
    AllowedMentions, ButtonStyle, Delivery, Destination, DestinationKind, LinkButton, LinkView, MessageReference,
    OutgoingMessage, SendOptions, prepare,
};

use crate::engine::Scope;

// --- Tag definitions ---------------------------------------------------------

/// Result type returned by every tag callback.
///
/// The returned text replaces the `{name: ...}` call in the script. Tags that
/// only have side effects return an empty string.
pub(crate) type TagResult = Result<String, ScriptError>;

pub(crate) type TagCallback = fn(&mut Scope, &Args) -> TagResult;

/// Whether a positional parameter must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    Required,
    /// Optional, with the default applied when the caller leaves it out.
    /// `None` means "unset" rather than an empty string.
    Optional(Option<&'static str>),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Param {
    pub name: &'static str,
    pub arity: Arity,
}

/// A callable tag: a primary name, its aliases, positional parameters and
/// the callback invoked with the evaluated arguments.
///
/// Definitions are declared with the `tag!` macro (see `src/macros.rs`) and
/// collected into one of the two static registries in `engine/registry.rs`.
pub(crate) struct TagDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub params: Vec<Param>,
    /// Extra trailing arguments are collected into `Args::rest` instead of
    /// being folded into the last parameter.
    pub variadic: bool,
    /// Brace groups written right after a call that is short of required
    /// arguments supply the missing ones: `{if: x}{yes}{no}`.
    pub trailing: bool,
    pub callback: TagCallback,
}

impl TagDefinition {
    pub fn required(&self) -> usize {
        self.params.iter().filter(|p| p.arity == Arity::Required).count()
    }
}

impl std::fmt::Debug for TagDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("params", &self.params)
            .field("variadic", &self.variadic)
            .field("trailing", &self.trailing)
            .field("callback", &"<function>")
            .finish()
    }
}

/// Arguments bound to a tag's parameters after defaults are applied.
#[derive(Debug, Clone, Default)]
pub(crate) struct Args {
    values: Vec<Option<String>>,
    rest: Vec<String>,
}

impl Args {
    pub fn new(values: Vec<Option<String>>, rest: Vec<String>) -> Self {
        Args { values, rest }
    }

    /// The bound value of parameter `idx`, or `None` when it was left unset.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).and_then(|v| v.as_deref())
    }

    /// The bound value of parameter `idx`, or `""` when it was left unset.
    pub fn text(&self, idx: usize) -> &str {
        self.get(idx).unwrap_or("")
    }

    /// Variadic trailing arguments.
    pub fn rest(&self) -> &[String] {
        &self.rest
    }
}
