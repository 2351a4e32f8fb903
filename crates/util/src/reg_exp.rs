//! Named validation patterns.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegExpError {
    #[error("UNKNOWN_PATTERN: {0}")]
    UnknownPattern(String),
}

/// A named pattern that input can be validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternName {
    Email,
    Url,
    Ipv4,
    Ipv6,
    /// Mainland China mobile number.
    Mobile,
    /// Landline number with an optional area code.
    Tel,
    PostalCode,
    /// 18-digit resident identity card number.
    IdCard,
    /// Han characters only.
    Chinese,
    Integer,
    Number,
    HexColor,
    /// `YYYY-MM-DD`.
    Date,
    Qq,
    Username,
}

impl PatternName {
    pub const ALL: [PatternName; 15] = [
        PatternName::Email,
        PatternName::Url,
        PatternName::Ipv4,
        PatternName::Ipv6,
        PatternName::Mobile,
        PatternName::Tel,
        PatternName::PostalCode,
        PatternName::IdCard,
        PatternName::Chinese,
        PatternName::Integer,
        PatternName::Number,
        PatternName::HexColor,
        PatternName::Date,
        PatternName::Qq,
        PatternName::Username,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternName::Email => "email",
            PatternName::Url => "url",
            PatternName::Ipv4 => "ipv4",
            PatternName::Ipv6 => "ipv6",
            PatternName::Mobile => "mobile",
            PatternName::Tel => "tel",
            PatternName::PostalCode => "postalCode",
            PatternName::IdCard => "idCard",
            PatternName::Chinese => "chinese",
            PatternName::Integer => "integer",
            PatternName::Number => "number",
            PatternName::HexColor => "hexColor",
            PatternName::Date => "date",
            PatternName::Qq => "qq",
            PatternName::Username => "username",
        }
    }

    fn source(&self) -> &'static str {
        match self {
            PatternName::Email => {
                r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$"
            }
            PatternName::Url => r"(?i)^(?:https?|ftp)://[^\s/$.?#][^\s]*$",
            PatternName::Ipv4 => {
                r"^(?:(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)$"
            }
            PatternName::Ipv6 => {
                r"(?i)^(?:(?:[0-9a-f]{1,4}:){7}[0-9a-f]{1,4}|(?:[0-9a-f]{1,4}:){1,7}:|(?:[0-9a-f]{1,4}:){1,6}:[0-9a-f]{1,4}|(?:[0-9a-f]{1,4}:){1,5}(?::[0-9a-f]{1,4}){1,2}|(?:[0-9a-f]{1,4}:){1,4}(?::[0-9a-f]{1,4}){1,3}|(?:[0-9a-f]{1,4}:){1,3}(?::[0-9a-f]{1,4}){1,4}|(?:[0-9a-f]{1,4}:){1,2}(?::[0-9a-f]{1,4}){1,5}|[0-9a-f]{1,4}:(?::[0-9a-f]{1,4}){1,6}|:(?:(?::[0-9a-f]{1,4}){1,7}|:))$"
            }
            PatternName::Mobile => r"^1[3-9]\d{9}$",
            PatternName::Tel => r"^(?:0\d{2,3}-)?[1-9]\d{6,7}$",
            PatternName::PostalCode => r"^[1-9]\d{5}$",
            PatternName::IdCard => {
                r"^[1-9]\d{5}(?:18|19|20)\d{2}(?:0[1-9]|1[0-2])(?:0[1-9]|[12]\d|3[01])\d{3}[\dXx]$"
            }
            PatternName::Chinese => r"^\p{Han}+$",
            PatternName::Integer => r"^-?\d+$",
            PatternName::Number => r"^-?\d+(?:\.\d+)?$",
            PatternName::HexColor => r"^#?(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$",
            PatternName::Date => r"^\d{4}-(?:0[1-9]|1[0-2])-(?:0[1-9]|[12]\d|3[01])$",
            PatternName::Qq => r"^[1-9]\d{4,10}$",
            PatternName::Username => r"^[A-Za-z0-9_-]{4,16}$",
        }
    }

    /// The compiled pattern. Compiled once per process.
    pub fn regex(&self) -> &'static Regex {
        static COMPILED: OnceLock<Vec<Regex>> = OnceLock::new();
        let compiled = COMPILED.get_or_init(|| {
            PatternName::ALL
                .iter()
                .map(|name| Regex::new(name.source()).unwrap())
                .collect()
        });
        &compiled[*self as usize]
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex().is_match(input)
    }
}

impl fmt::Display for PatternName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternName {
    type Err = RegExpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| RegExpError::UnknownPattern(s.to_string()))
    }
}

/// Check `input` against the pattern registered under `name`.
///
/// ```
/// use zutil::reg_exp::{is_reg_exp, RegExpError};
///
/// assert_eq!(is_reg_exp("13812345678", "mobile"), Ok(true));
/// assert_eq!(is_reg_exp("hello", "email"), Ok(false));
/// assert!(matches!(is_reg_exp("x", "nope"), Err(RegExpError::UnknownPattern(_))));
/// ```
pub fn is_reg_exp(input: &str, name: &str) -> Result<bool, RegExpError> {
    let pattern: PatternName = name.parse()?;
    Ok(pattern.is_match(input))
}
