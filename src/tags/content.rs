//! Content tags.
//!
//! These run over the whole variable-resolved script before it is cut into
//! embed segments. Text transforms return their result in place of the call;
//! `message` and `button` record side effects on the [`Scope`] and return
//! nothing.

use rand::seq::SliceRandom;

use super::condition;
use super::helpers::{length, mask, repair_brace, unless_unset};
use crate::engine::Scope;
use crate::payload::LinkButtonSpec;
use crate::{Args, TagDefinition, TagResult};

/// Content tags in registration order.
pub(crate) fn definitions() -> Vec<TagDefinition> {
    vec![
        tag! { name: "lower", aliases: ["lowercase"], params: [param!(value)], call: lower },
        tag! { name: "upper", aliases: ["uppercase"], params: [param!(value)], call: upper },
        tag! { name: "hidden", aliases: ["hide"], params: [param!(value)], call: hidden },
        tag! { name: "quote", aliases: ["http"], params: [param!(value)], call: quote },
        tag! { name: "len", aliases: ["length", "size", "count"], params: [param!(value)], call: len },
        tag! { name: "strip", aliases: ["remove"], params: [param!(text), param!(removal)], call: strip },
        tag! { name: "random", aliases: ["choose", "choice"], variadic: true, call: random },
        tag! {
            name: "if",
            aliases: ["%"],
            params: [param!(condition), param!(output), param!(err = "")],
            trailing: true,
            call: if_then_else,
        },
        tag! { name: "message", aliases: ["content", "msg"], params: [param!(value)], call: message },
        tag! {
            name: "button",
            aliases: ["url"],
            params: [param!(url), param!(label?), param!(emoji?)],
            call: button,
        },
    ]
}

// --- Text transforms ---------------------------------------------------------

fn lower(_: &mut Scope, args: &Args) -> TagResult {
    Ok(args.text(0).to_lowercase())
}

fn upper(_: &mut Scope, args: &Args) -> TagResult {
    Ok(args.text(0).to_uppercase())
}

fn hidden(_: &mut Scope, args: &Args) -> TagResult {
    Ok(mask(args.text(0)))
}

/// Percent-encode every reserved character, `/` included.
fn quote(_: &mut Scope, args: &Args) -> TagResult {
    Ok(urlencoding::encode(args.text(0)).into_owned())
}

fn len(_: &mut Scope, args: &Args) -> TagResult {
    Ok(length(args.text(0)).to_string())
}

fn strip(_: &mut Scope, args: &Args) -> TagResult {
    let removal = args.text(1);
    if removal.is_empty() {
        return Ok(args.text(0).to_string());
    }
    Ok(args.text(0).replace(removal, ""))
}

fn random(scope: &mut Scope, args: &Args) -> TagResult {
    match args.rest().choose(scope.rng()) {
        Some(item) => Ok(item.clone()),
        None => {
            tracing::trace!("random called without items");
            Ok(String::new())
        }
    }
}

// --- Control -----------------------------------------------------------------

fn if_then_else(_: &mut Scope, args: &Args) -> TagResult {
    let output = repair_brace(args.text(1));
    let err = repair_brace(args.text(2));

    if condition::evaluate(args.text(0))? { Ok(output) } else { Ok(err) }
}

// --- Side effects ------------------------------------------------------------

fn message(scope: &mut Scope, args: &Args) -> TagResult {
    scope.content = Some(args.text(0).to_string());
    Ok(String::new())
}

fn button(scope: &mut Scope, args: &Args) -> TagResult {
    scope.buttons.push(LinkButtonSpec {
        url: args.text(0).to_string(),
        label: unless_unset(args.get(1)),
        emoji: unless_unset(args.get(2)),
    });
    Ok(String::new())
}
