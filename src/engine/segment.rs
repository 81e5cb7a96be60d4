//! Embed segmentation.
//!
//! After content tags have run, the script is cut into embed segments at every
//! top-level `{embed}` call. The sentinel is recognized with the same brace
//! grammar as any other tag, so an `{embed}` nested inside another group's
//! arguments (for example in a description) does not start a new embed.
//!
//! ```text
//! "{embed}{title: A}{embed}{title: B}"
//!   └ ""   └ "{title: A}" └ "{title: B}"   (empty segments are skipped)
//! ```

use super::parser::{group_end, split_call};

/// Name of the zero-argument call that separates embeds.
pub(crate) const SENTINEL: &str = "embed";

/// Non-empty, trimmed segments of `script`, in order.
pub(crate) fn segments(script: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut cursor = 0;

    while let Some(offset) = script[cursor..].find('{') {
        let open = cursor + offset;
        let Some(close) = group_end(script, open) else {
            cursor = open + 1;
            continue;
        };

        if matches!(split_call(&script[open + 1..close]), Some((SENTINEL, None))) {
            out.push(&script[start..open]);
            start = close + 1;
        }
        cursor = close + 1;
    }
    out.push(&script[start..]);

    out.into_iter().map(str::trim).filter(|s| !s.is_empty()).collect()
}
