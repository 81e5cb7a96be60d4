//! Built-in tag sets.
//!
//! - `content.rs`: tags evaluated over the whole script: string transforms,
//!   `if`, and the `message`/`button` side effects.
//! - `condition.rs`: the condition grammar used by `if`.
//! - `embed.rs`: tags evaluated inside one embed segment; each sets an
//!   attribute of the open embed.
//! - `color.rs`: color names, hex parsing and the special color keywords.
//! - `helpers.rs`: small predicates and text helpers shared by both sets.

#[path = "tags/color.rs"]
pub(crate) mod color;
#[path = "tags/condition.rs"]
pub(crate) mod condition;
#[path = "tags/content.rs"]
pub(crate) mod content;
#[path = "tags/embed.rs"]
pub(crate) mod embed;
#[path = "tags/helpers.rs"]
pub(crate) mod helpers;

#[cfg(test)]
#[path = "tags/tests.rs"]
mod tests;
