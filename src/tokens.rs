//! Token catalog and variable resolution.
//!
//! Placeholders are fixed literal tokens such as `{user.mention}` or
//! `{unix(guild.created_at)}`. They are substituted before any tag runs, so
//! tag arguments see the rendered values.
//!
//! - `catalog.rs`: the data-driven `(namespace, field) -> formatter` tables.
//! - `format.rs`: dates, counts, ordinals and other shared formatting.
//! - `resolve.rs`: binds the tables for the keys present in a `Context` and
//!   performs the replacement pass.

#[path = "tokens/catalog.rs"]
mod catalog;
#[path = "tokens/format.rs"]
pub(crate) mod format;
#[path = "tokens/resolve.rs"]
mod resolve;

#[cfg(test)]
#[path = "tokens/tests.rs"]
mod tests;

pub(crate) use resolve::resolve;
