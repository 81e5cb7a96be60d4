//! Tag grammar and evaluator.
//!
//! A tag call is a brace group whose head names a registered tag:
//!
//! ```text
//! {name}                      zero-argument call (tags without required
//!                             parameters only)
//! {name: arg1 && arg2 && ...} positional arguments split on " && "
//! {if: cond}{yes}{no}         trailing groups fill missing arguments
//! ```
//!
//! The trailing form applies to tags declared with `trailing: true`, and only
//! when the `&&` arguments fall short of the required ones. Groups must follow
//! the call directly; each one contributes its expanded body, so a branch that
//! should stay a call for the embed pass is written `{{title: A}}`.
//!
//! Evaluation is inner-first: the body of every brace group is expanded before
//! the group itself is considered, so `{upper: {lower: Mixed}}` sees `mixed`.
//! A group whose head is not a known tag (a leftover placeholder such as
//! `{user}`, or a tag from the other namespace) is kept as literal text with
//! its already-expanded body.
//!
//! ```text
//! "a {upper: b {lower: C}} {user}"
//!        │        └─ expand inner ─▶ "c"
//!        └─ call upper("b c") ─────▶ "B C"
//!                                {user} unknown ─▶ kept
//! = "a B C {user}"
//! ```
//!
//! Tag results are not re-expanded within the same pass, which keeps a pass
//! linear in the number of groups and lets content tags emit embed tags for
//! the later embed pass.

use super::registry::TagRegistry;
use super::scope::Scope;
use crate::{Args, Arity, ScriptError, TagDefinition};

/// Separator between positional arguments.
pub(crate) const DELIMITER: &str = " && ";

/// Evaluates tag calls from one registry over a piece of text.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Parser<'r> {
    registry: &'r TagRegistry,
}

impl<'r> Parser<'r> {
    pub fn new(registry: &'r TagRegistry) -> Self {
        Parser { registry }
    }

    /// Expand every recognized tag call in `input`.
    pub fn expand(&self, input: &str, scope: &mut Scope) -> Result<String, ScriptError> {
        let mut out = String::with_capacity(input.len());
        let mut cursor = 0;

        while let Some(offset) = input[cursor..].find('{') {
            let open = cursor + offset;
            out.push_str(&input[cursor..open]);

            let Some(close) = group_end(input, open) else {
                // Unbalanced: the brace is plain text.
                out.push('{');
                cursor = open + 1;
                continue;
            };

            let body = self.expand(&input[open + 1..close], scope)?;
            cursor = close + 1;
            match self.call(&body, input, &mut cursor, scope)? {
                Some(result) => out.push_str(&result),
                None => {
                    out.push('{');
                    out.push_str(&body);
                    out.push('}');
                }
            }
        }

        out.push_str(&input[cursor..]);
        Ok(out)
    }

    /// Invoke the tag named by `body`, if any. `Ok(None)` means the group is
    /// not a call in this namespace. `cursor` points just past the group in
    /// `input` and moves past any trailing groups the call consumes.
    fn call(
        &self,
        body: &str,
        input: &str,
        cursor: &mut usize,
        scope: &mut Scope,
    ) -> Result<Option<String>, ScriptError> {
        let Some((name, raw)) = split_call(body) else {
            return Ok(None);
        };
        let Some(tag) = self.registry.lookup(name) else {
            tracing::trace!(name, namespace = %self.registry.namespace(), "not a tag; kept as text");
            return Ok(None);
        };
        // `{color}` is a placeholder, not a call, unless the tag needs nothing.
        if raw.is_none() && tag.required() > 0 {
            tracing::trace!(name, "bare name of a tag with required parameters; kept as text");
            return Ok(None);
        }

        let mut args = raw.map(split_args).unwrap_or_default();
        if tag.trailing && args.len() < tag.required() {
            self.take_trailing(tag, &mut args, input, cursor, scope)?;
        }

        let args = bind(tag, args)?;
        scope.tag_calls += 1;
        tracing::debug!(tag = tag.name, called_as = name, namespace = %self.registry.namespace(), "invoking tag");

        (tag.callback)(scope, &args).map(Some)
    }

    /// Append the bodies of the groups directly after `cursor` to `args`, up
    /// to one per parameter.
    fn take_trailing(
        &self,
        tag: &TagDefinition,
        args: &mut Vec<String>,
        input: &str,
        cursor: &mut usize,
        scope: &mut Scope,
    ) -> Result<(), ScriptError> {
        while args.len() < tag.params.len() && input[*cursor..].starts_with('{') {
            let Some(end) = group_end(input, *cursor) else {
                break;
            };
            args.push(self.expand(&input[*cursor + 1..end], scope)?.trim().to_string());
            *cursor = end + 1;
        }
        tracing::trace!(tag = tag.name, args = args.len(), "filled arguments from trailing groups");
        Ok(())
    }
}

/// Byte index of the `}` closing the group opened at `open`, honoring nested
/// groups. `None` when the group is never closed.
pub(crate) fn group_end(input: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, byte) in input.bytes().enumerate().skip(open) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a group body into its tag name and raw argument text.
///
/// `"title: Hi"` -> `("title", Some("Hi"))`, `"timestamp"` ->
/// `("timestamp", None)`. Bodies whose head could not be a tag name return
/// `None`.
pub(crate) fn split_call(body: &str) -> Option<(&str, Option<&str>)> {
    let (head, raw) = match body.find(':') {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };

    let name = head.trim();
    if name.is_empty() || name.contains(|c: char| c.is_whitespace() || c == '{' || c == '}') {
        return None;
    }
    Some((name, raw))
}

/// Split raw argument text on [`DELIMITER`], trimming each argument.
pub(crate) fn split_args(raw: &str) -> Vec<String> {
    raw.split(DELIMITER).map(|arg| arg.trim().to_string()).collect()
}

/// Bind positional arguments to `tag`'s parameters.
///
/// - Fewer arguments than required parameters is a `MissingParameter` error
///   naming the first parameter left without a value.
/// - Unset optional parameters take their declared default.
/// - Surplus arguments go to `Args::rest` for variadic tags; otherwise they
///   are folded back into the last parameter, so a literal `" && "` inside a
///   final free-text argument survives.
pub(crate) fn bind(tag: &TagDefinition, mut args: Vec<String>) -> Result<Args, ScriptError> {
    if let Some(missing) = tag.params.iter().skip(args.len()).find(|p| p.arity == Arity::Required) {
        return Err(ScriptError::MissingParameter { tag: tag.name, parameter: missing.name });
    }

    let mut rest = Vec::new();
    if args.len() > tag.params.len() {
        let surplus = args.split_off(tag.params.len());
        if tag.variadic {
            rest = surplus;
        } else if let Some(last) = args.last_mut() {
            for extra in surplus {
                last.push_str(DELIMITER);
                last.push_str(&extra);
            }
        } else {
            tracing::trace!(tag = tag.name, dropped = surplus.len(), "arguments given to a tag without parameters");
        }
    }

    let mut values: Vec<Option<String>> = Vec::with_capacity(tag.params.len());
    let mut supplied = args.into_iter();
    for param in &tag.params {
        let value = match (supplied.next(), param.arity) {
            (Some(arg), _) => Some(arg),
            (None, Arity::Optional(default)) => default.map(str::to_string),
            (None, Arity::Required) => None,
        };
        values.push(value);
    }

    Ok(Args::new(values, rest))
}
