//! Condition grammar for the `if` tag.
//!
//! A condition holds at most one binary operator. Operators are looked for in
//! a fixed order, so `>=` is found before `>`:
//!
//! ```text
//! ==  !=        case-insensitive string comparison (operands trimmed)
//! >=  <=  >  <  integer comparison (thousands separators removed)
//! (none)        truthiness of the whole string
//! ```

use std::cmp::Ordering;

use super::helpers::is_truthy;
use crate::ScriptError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
}

impl Operator {
    /// Search order.
    const ALL: [(&'static str, Operator); 6] = [
        ("==", Operator::Eq),
        ("!=", Operator::Ne),
        (">=", Operator::Ge),
        ("<=", Operator::Le),
        (">", Operator::Gt),
        ("<", Operator::Lt),
    ];

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Ne => ordering != Ordering::Equal,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Lt => ordering == Ordering::Less,
        }
    }

    fn is_numeric(self) -> bool {
        !matches!(self, Operator::Eq | Operator::Ne)
    }
}

/// Evaluate `condition`.
///
/// Numeric comparisons whose operands are not integers fail with
/// [`ScriptError::NumericParse`].
pub(crate) fn evaluate(condition: &str) -> Result<bool, ScriptError> {
    let Some((left, op, right)) = split(condition) else {
        return Ok(is_truthy(condition));
    };

    let ordering = if op.is_numeric() {
        number(condition, left)?.cmp(&number(condition, right)?)
    } else {
        left.trim().to_lowercase().cmp(&right.trim().to_lowercase())
    };
    Ok(op.holds(ordering))
}

fn split(condition: &str) -> Option<(&str, Operator, &str)> {
    Operator::ALL.iter().find_map(|&(symbol, op)| {
        condition.split_once(symbol).map(|(left, right)| (left, op, right))
    })
}

fn number(condition: &str, operand: &str) -> Result<i64, ScriptError> {
    let cleaned = operand.replace(',', "");
    cleaned.trim().parse().map_err(|source| ScriptError::NumericParse {
        condition: condition.to_string(),
        operand: operand.trim().to_string(),
        source,
    })
}
