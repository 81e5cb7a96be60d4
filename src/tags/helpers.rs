//! Small predicates and text helpers shared by the tag sets.

/// Words that mean "leave this unset" when given for an optional button
/// part. Matched exactly.
const UNSET_WORDS: &[&str] = &["null", "none", "no", "false", "off"];

/// Words that turn an author icon off. Matched case-insensitively.
const ICON_OFF_WORDS: &[&str] = &["off", "no", "none", "null", "false", "disable"];

/// Words a condition treats as false. Matched case-insensitively after
/// trimming; the empty string is false too.
const FALSY_WORDS: &[&str] = &["null", "no", "false", "none", ""];

/// `Some(value)` unless `value` is empty or one of the unset words.
pub(crate) fn unless_unset(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty() && !UNSET_WORDS.contains(v)).map(str::to_string)
}

pub(crate) fn is_icon_off(value: &str) -> bool {
    let lowered = value.to_lowercase();
    ICON_OFF_WORDS.contains(&lowered.as_str())
}

pub(crate) fn is_truthy(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    !FALSY_WORDS.contains(&lowered.as_str())
}

/// Re-close a branch of `if` that lost its closing brace to argument
/// splitting: `"{title: x"` becomes `"{title: x}"`.
pub(crate) fn repair_brace(branch: &str) -> String {
    if branch.starts_with('{') && !branch.ends_with('}') {
        format!("{branch}}}")
    } else {
        branch.to_string()
    }
}

/// Spoiler-mask `value` so clients render it hidden until clicked.
pub(crate) fn mask(value: &str) -> String {
    if value.is_empty() { String::new() } else { format!("||{value}||") }
}

/// Length of `value` as `len` reports it.
///
/// - `"a, b, c"` is a list of 3 items.
/// - `"1,234"` is the number 1234.
/// - anything else counts characters.
pub(crate) fn length(value: &str) -> usize {
    if value.contains(", ") {
        return value.split(", ").count();
    }
    if value.contains(',') {
        let digits = value.replace(',', "");
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(number) = digits.parse() {
                return number;
            }
        }
    }
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_words_are_exact() {
        assert_eq!(unless_unset(Some("null")), None);
        assert_eq!(unless_unset(Some("")), None);
        assert_eq!(unless_unset(None), None);
        assert_eq!(unless_unset(Some("Null")).as_deref(), Some("Null"));
        assert_eq!(unless_unset(Some("Label")).as_deref(), Some("Label"));
    }

    #[test]
    fn truthiness() {
        for falsy in ["", "  ", "no", "FALSE", " None ", "null"] {
            assert!(!is_truthy(falsy), "{falsy:?}");
        }
        for truthy in ["yes", "0", "off", "anything"] {
            assert!(is_truthy(truthy), "{truthy:?}");
        }
    }

    #[test]
    fn icon_switches() {
        assert!(is_icon_off("Disable"));
        assert!(is_icon_off("off"));
        assert!(!is_icon_off("https://x.io/a.png"));
    }

    #[test]
    fn braces_are_repaired_once() {
        assert_eq!(repair_brace("{title: x"), "{title: x}");
        assert_eq!(repair_brace("{title: x}"), "{title: x}");
        assert_eq!(repair_brace("plain"), "plain");
    }

    #[test]
    fn length_rules() {
        assert_eq!(length("a, b, c"), 3);
        assert_eq!(length("1,234"), 1234);
        assert_eq!(length("a,b"), 3);
        assert_eq!(length("héllo"), 5);
        assert_eq!(length(""), 0);
    }

    #[test]
    fn masking() {
        assert_eq!(mask("secret"), "||secret||");
        assert_eq!(mask(""), "");
    }
}
