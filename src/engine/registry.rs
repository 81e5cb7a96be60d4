//! Tag registries.
//!
//! This module holds the *static* side of the compiler: the two disjoint tag
//! namespaces and the name/alias index used to look tags up.
//!
//! Both registries are built exactly once, the first time either is touched
//! (or eagerly through [`crate::warm_up`]). `once_cell::sync::Lazy` makes the
//! first build race-free, so concurrent first compilations observe one fully
//! populated registry and never a partially registered one.
//!
//! ## Lookup
//!
//! Names and aliases share one index per namespace. Registration order
//! matters: when two tags claim the same alias the later one wins. Every such
//! collision is recorded as a [`Diagnostic`] and logged once at build time so
//! the owner of the tag set can decide which binding is intended.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::TagDefinition;

pub(crate) static CONTENT_TAGS: Lazy<TagRegistry> =
    Lazy::new(|| TagRegistry::new(Namespace::Content, crate::tags::content::definitions()));

pub(crate) static EMBED_TAGS: Lazy<TagRegistry> =
    Lazy::new(|| TagRegistry::new(Namespace::Embed, crate::tags::embed::definitions()));

/// Which tag set a name is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Tags evaluated over the whole script (string transforms, `if`,
    /// `message`, `button`).
    Content,
    /// Tags evaluated inside one embed segment.
    Embed,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Content => f.write_str("content"),
            Namespace::Embed => f.write_str("embed"),
        }
    }
}

/// A registration conflict found while building the registries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Two tags in one namespace claim the same name; `winner` (registered
    /// later) is the one that answers to it.
    DuplicateAlias { namespace: Namespace, alias: &'static str, shadowed: &'static str, winner: &'static str },
    /// A name resolves in both namespaces. Content tags run first, so the
    /// embed tag is unreachable under this name.
    CrossNamespace { name: &'static str, content: &'static str, embed: &'static str },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateAlias { namespace, alias, shadowed, winner } => write!(
                f,
                "{namespace} alias `{alias}` is claimed by both `{shadowed}` and `{winner}`; `{winner}` wins"
            ),
            Diagnostic::CrossNamespace { name, content, embed } => write!(
                f,
                "`{name}` names content tag `{content}` and embed tag `{embed}`; the content tag runs first"
            ),
        }
    }
}

#[derive(Debug)]
pub(crate) struct TagRegistry {
    namespace: Namespace,
    tags: Vec<TagDefinition>,
    index: HashMap<&'static str, usize>,
    conflicts: Vec<Diagnostic>,
}

impl TagRegistry {
    pub fn new(namespace: Namespace, tags: Vec<TagDefinition>) -> Self {
        let mut index: HashMap<&'static str, usize> = HashMap::new();
        let mut conflicts = Vec::new();

        for (id, tag) in tags.iter().enumerate() {
            for name in std::iter::once(tag.name).chain(tag.aliases.iter().copied()) {
                if let Some(previous) = index.insert(name, id) {
                    if previous != id {
                        let diagnostic = Diagnostic::DuplicateAlias {
                            namespace,
                            alias: name,
                            shadowed: tags[previous].name,
                            winner: tag.name,
                        };
                        tracing::warn!(%diagnostic, "tag alias collision");
                        conflicts.push(diagnostic);
                    }
                }
            }
        }

        tracing::debug!(%namespace, tags = tags.len(), names = index.len(), "tag registry built");
        TagRegistry { namespace, tags, index, conflicts }
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn lookup(&self, name: &str) -> Option<&TagDefinition> {
        self.index.get(name).map(|&id| &self.tags[id])
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.index.keys().copied()
    }

    pub fn conflicts(&self) -> &[Diagnostic] {
        &self.conflicts
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

/// All registration conflicts across both namespaces, in a stable order.
pub fn diagnostics() -> Vec<Diagnostic> {
    let mut out: Vec<Diagnostic> = CONTENT_TAGS.conflicts().to_vec();
    out.extend_from_slice(EMBED_TAGS.conflicts());

    let mut shared: Vec<&'static str> = EMBED_TAGS.names().filter(|n| CONTENT_TAGS.lookup(n).is_some()).collect();
    shared.sort_unstable();
    for name in shared {
        if let (Some(content), Some(embed)) = (CONTENT_TAGS.lookup(name), EMBED_TAGS.lookup(name)) {
            out.push(Diagnostic::CrossNamespace { name, content: content.name, embed: embed.name });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Scope;
    use crate::{Args, TagResult};

    fn noop(_: &mut Scope, _: &Args) -> TagResult {
        Ok(String::new())
    }

    #[test]
    fn later_registration_wins_and_is_reported() {
        let registry = TagRegistry::new(
            Namespace::Embed,
            vec![
                tag! { name: "title", aliases: ["t"], params: [param!(value)], call: noop },
                tag! { name: "timestamp", aliases: ["t"], call: noop },
            ],
        );

        assert_eq!(registry.lookup("t").map(|t| t.name), Some("timestamp"));
        assert_eq!(registry.lookup("title").map(|t| t.name), Some("title"));
        assert_eq!(
            registry.conflicts(),
            &[Diagnostic::DuplicateAlias {
                namespace: Namespace::Embed,
                alias: "t",
                shadowed: "title",
                winner: "timestamp"
            }]
        );
    }

    #[test]
    fn builtin_collisions_are_surfaced() {
        let found = diagnostics();
        let aliases: Vec<(&str, &str)> = found
            .iter()
            .filter_map(|d| match d {
                Diagnostic::DuplicateAlias { alias, winner, .. } => Some((*alias, *winner)),
                _ => None,
            })
            .collect();

        assert!(aliases.contains(&("t", "thumbnail")));
        assert!(aliases.contains(&("t", "timestamp")));
        assert!(aliases.contains(&("f", "footer")));
        assert!(found.contains(&Diagnostic::CrossNamespace { name: "url", content: "button", embed: "url" }));
    }

    #[test]
    fn registries_are_disjoint_by_primary_name() {
        assert!(CONTENT_TAGS.lookup("title").is_none());
        assert!(EMBED_TAGS.lookup("if").is_none());
        assert!(CONTENT_TAGS.len() >= 10);
        assert!(EMBED_TAGS.len() >= 10);
    }
}
