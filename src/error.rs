use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised while compiling or delivering a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// A tag was invoked with fewer arguments than it has required
    /// parameters. This is the error shown to script authors when a script
    /// is validated.
    #[error("The **{tag}** method requires the `{parameter}` parameter")]
    MissingParameter { tag: &'static str, parameter: &'static str },

    /// An operand of a numeric `if` comparison is not an integer.
    #[error("invalid number `{operand}` in condition `{condition}`")]
    NumericParse {
        condition: String,
        operand: String,
        #[source]
        source: ParseIntError,
    },

    /// The destination refused the compiled message.
    #[error("failed to deliver message: {0}")]
    Delivery(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ScriptError {
    /// Whether the error is meant to be shown verbatim to the script author.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, ScriptError::MissingParameter { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_reads_as_instruction() {
        let err = ScriptError::MissingParameter { tag: "field", parameter: "value" };
        assert_eq!(err.to_string(), "The **field** method requires the `value` parameter");
        assert!(err.is_user_facing());
    }

    #[test]
    fn numeric_parse_keeps_source() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = ScriptError::NumericParse { condition: "abc > 1".into(), operand: "abc".into(), source };
        assert!(!err.is_user_facing());
        assert!(std::error::Error::source(&err).is_some());
    }
}
