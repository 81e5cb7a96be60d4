//! Compilation engine.
//!
//! ## How the parts work together
//!
//! ```text
//! tag definitions ──┐
//! (src/tags/**)     │  TagRegistry::new            (registry.rs)
//!                   └──────────────┬──────────────
//!                                  │  CONTENT_TAGS / EMBED_TAGS (built once)
//!                                  v
//! source ── tokens::resolve ── Parser::expand (content) ── segments ── Parser::expand (embed)
//!                              (parser.rs)                 (segment.rs) per segment
//!                                  │                                   │
//!                                  └────────── Scope (scope.rs) ◀──────┘
//!                                                │
//!                                                v
//!                                         MessagePayload (compile.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `registry.rs`: the two static tag namespaces, alias index and
//!   registration diagnostics.
//! - `parser.rs`: brace-group grammar, inner-first evaluation, argument
//!   splitting and parameter binding.
//! - `segment.rs`: cuts the content-resolved script at top-level `{embed}`
//!   calls.
//! - `scope.rs`: per-compilation state mutated by tag callbacks.
//! - `compile.rs`: the pipeline tying the stages together.
//! - `metrics.rs`: timing and counters for verbose runs.
//!
//! ## Adding a tag
//!
//! Declare it with `tag!` in `src/tags/content.rs` or `src/tags/embed.rs` and
//! add it to that module's `definitions()`. Registration conflicts show up in
//! [`diagnostics`] and in a `warn!` log line when the registry is built.

#[path = "engine/compile.rs"]
mod compile;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/registry.rs"]
mod registry;
#[path = "engine/scope.rs"]
mod scope;
#[path = "engine/segment.rs"]
mod segment;

pub(crate) use compile::compile;
pub use metrics::CompileMetrics;
pub(crate) use registry::{CONTENT_TAGS, EMBED_TAGS};
pub use registry::{Diagnostic, Namespace, diagnostics};
pub(crate) use scope::Scope;
