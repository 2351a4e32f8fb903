//! Case conversion helpers.

use std::sync::OnceLock;

use regex::{Captures, Regex};

fn separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-_]+(.)?").unwrap())
}

fn upper_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Z])").unwrap())
}

fn underscores_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_+").unwrap())
}

/// Convert dashed or snake-cased text to camelCase.
///
/// Every run of `-`/`_` is removed and the character after it upper-cased.
///
/// ```
/// use zutil::string::camelize;
///
/// assert_eq!(camelize("background-color"), "backgroundColor");
/// assert_eq!(camelize("user__name"), "userName");
/// assert_eq!(camelize("trailing-"), "trailing");
/// ```
pub fn camelize(s: &str) -> String {
    separator_regex()
        .replace_all(s, |caps: &Captures| {
            caps.get(1)
                .map_or_else(String::new, |m| m.as_str().to_uppercase())
        })
        .into_owned()
}

/// Convert camelCase or snake_case text to dash-case.
///
/// ```
/// use zutil::string::dasherize;
///
/// assert_eq!(dasherize("backgroundColor"), "background-color");
/// assert_eq!(dasherize("user_name"), "user-name");
/// ```
pub fn dasherize(s: &str) -> String {
    let dashed = upper_regex().replace_all(s, "-$1");
    underscores_regex()
        .replace_all(&dashed, "-")
        .to_lowercase()
}
