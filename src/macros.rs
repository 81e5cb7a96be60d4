#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Declare a positional tag parameter.
///
/// - `param!(value)` is required.
/// - `param!(label?)` is optional and unset by default.
/// - `param!(inline = "true")` is optional with a default.
#[macro_export]
macro_rules! param {
    ($name:ident) => {
        $crate::Param { name: stringify!($name), arity: $crate::Arity::Required }
    };
    ($name:ident ?) => {
        $crate::Param { name: stringify!($name), arity: $crate::Arity::Optional(None) }
    };
    ($name:ident = $default:literal) => {
        $crate::Param { name: stringify!($name), arity: $crate::Arity::Optional(Some($default)) }
    };
}

#[macro_export]
macro_rules! tag {
    (
        name: $name:expr
        $(, aliases: [ $($alias:expr),* $(,)? ])?
        $(, params: [ $($param:expr),* $(,)? ])?
        $(, variadic: $variadic:expr)?
        $(, trailing: $trailing:expr)?
        , call: $callback:expr
        $(,)?
    ) => {{
        $crate::TagDefinition {
            name: $name,
            aliases: &[ $($($alias),*)? ],
            params: vec![ $($($param),*)? ],
            variadic: { false $(|| $variadic)? },
            trailing: { false $(|| $trailing)? },
            callback: $callback,
        }
    }};
}
