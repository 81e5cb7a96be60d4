//! Compilation metrics.
//!
//! Timings and counters for one compilation, collected by
//! [`crate::render_verbose`] and printed by the CLI report. They are cheap to
//! gather and never influence the compiled payload.

use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct CompileMetrics {
    /// Total elapsed time for the compilation.
    pub total: Duration,
    /// Time spent substituting placeholders.
    pub variables: Duration,
    /// Time spent in the content tag pass.
    pub content: Duration,
    /// Time spent segmenting and running embed tags.
    pub embeds: Duration,
    /// Number of tag callbacks invoked across both passes.
    pub tag_calls: usize,
    /// Number of non-empty segments handed to the embed pass.
    pub segments: usize,
    /// Number of embeds committed to the payload.
    pub committed: usize,
}
