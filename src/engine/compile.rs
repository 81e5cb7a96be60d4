//! The compile pipeline.
//!
//! ```text
//! source ─▶ tokens::resolve ─▶ content pass ─▶ segments ─▶ embed pass (per segment) ─▶ payload
//!           (placeholders)     (CONTENT_TAGS)  ({embed})    (EMBED_TAGS, one open embed)
//! ```
//!
//! The function is pure in `(source, context, options)` apart from `random`
//! and the default `timestamp`, and both become deterministic when
//! `Options::seed` and `Options::now` are set.

use std::time::Instant;

use super::metrics::CompileMetrics;
use super::parser::Parser;
use super::registry::{CONTENT_TAGS, EMBED_TAGS};
use super::scope::Scope;
use super::segment::segments;
use crate::api::{Compiled, CompiledType, Options};
use crate::{Context, ScriptError, tokens};

pub(crate) fn compile(source: &str, context: &Context, options: &Options) -> Result<Compiled, ScriptError> {
    let started = Instant::now();
    let mut metrics = CompileMetrics::default();
    let mut scope = Scope::new(options);

    let stage = Instant::now();
    let resolved = tokens::resolve(source, context);
    metrics.variables = stage.elapsed();

    let stage = Instant::now();
    let content = Parser::new(&CONTENT_TAGS).expand(&resolved, &mut scope)?;
    metrics.content = stage.elapsed();

    let stage = Instant::now();
    let embed_parser = Parser::new(&EMBED_TAGS);
    for segment in segments(&content) {
        metrics.segments += 1;
        scope.open_embed();
        // Text left over after embed tags run is not part of the message.
        embed_parser.expand(segment, &mut scope)?;
        scope.commit_embed();
    }
    metrics.embeds = stage.elapsed();

    metrics.tag_calls = scope.tag_calls;
    let payload = scope.into_payload(content);
    metrics.committed = payload.embeds.len();
    metrics.total = started.elapsed();

    let kind = CompiledType::of(&payload);
    tracing::debug!(
        kind = ?kind,
        embeds = payload.embeds.len(),
        buttons = payload.buttons.len(),
        tag_calls = metrics.tag_calls,
        "compiled script"
    );

    Ok(Compiled { payload, kind, metrics })
}
