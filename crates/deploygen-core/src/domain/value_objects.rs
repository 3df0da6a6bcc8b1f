//! Domain value objects: Switch, SearchMode, AuthScheme, LogLevel, ConfigFormat.
//!
//! # Design
//!
//! These are pure `Copy` value types with equality by value.
//! Every one of them is parsed from an exact literal: no case folding, no
//! trimming, no aliases. Deployment tooling passes these strings verbatim and
//! the rendered files echo them back verbatim, so `"True"` is rejected rather
//! than normalised.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and extend `ALLOWED`
//! 3. Validation error messages pick up the new literal

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

use crate::domain::error::DomainError;

/// A closed set of literal spellings.
///
/// Implemented by every enumerated parameter so the validator can report
/// which field failed and what it accepts.
pub trait Literal: Sized + Copy {
    /// Every accepted spelling, in display order.
    const ALLOWED: &'static [&'static str];

    fn from_literal(s: &str) -> Option<Self>;

    fn as_str(&self) -> &'static str;

    /// Parse `value` on behalf of `field`.
    fn parse_for(field: &'static str, value: &str) -> Result<Self, DomainError> {
        Self::from_literal(value).ok_or_else(|| DomainError::InvalidEnumValue {
            field,
            value: value.to_string(),
            allowed: Self::ALLOWED,
        })
    }
}

macro_rules! impl_display_via_literal {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(Literal::as_str(self))
                }
            }
        )+
    };
}

// ── Switch ───────────────────────────────────────────────────────────────────

/// A boolean-style flag spelled `true` / `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Switch {
    True,
    False,
}

impl Switch {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::True)
    }
}

impl Literal for Switch {
    const ALLOWED: &'static [&'static str] = &["true", "false"];

    fn from_literal(s: &str) -> Option<Self> {
        match s {
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
        }
    }
}

// ── SearchMode ───────────────────────────────────────────────────────────────

/// Full-text search toggle, spelled `off` / `on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Off,
    On,
}

impl SearchMode {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl Literal for SearchMode {
    const ALLOWED: &'static [&'static str] = &["off", "on"];

    fn from_literal(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Self::Off),
            "on" => Some(Self::On),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }
}

// ── AuthScheme ───────────────────────────────────────────────────────────────

/// Which authentication backend the services talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    Internal,
    Iam,
}

impl Literal for AuthScheme {
    const ALLOWED: &'static [&'static str] = &["internal", "iam"];

    fn from_literal(s: &str) -> Option<Self> {
        match s {
            "internal" => Some(Self::Internal),
            "iam" => Some(Self::Iam),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Iam => "iam",
        }
    }
}

// ── LogLevel ─────────────────────────────────────────────────────────────────

/// Service log verbosity, a single digit `0`..=`9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LogLevel(u8);

impl LogLevel {
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Literal for LogLevel {
    const ALLOWED: &'static [&'static str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

    fn from_literal(s: &str) -> Option<Self> {
        Self::ALLOWED
            .iter()
            .position(|lit| *lit == s)
            .map(|idx| Self(idx as u8))
    }

    fn as_str(&self) -> &'static str {
        Self::ALLOWED[self.0 as usize]
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self(3)
    }
}

// ── ConfigFormat ─────────────────────────────────────────────────────────────

/// Catalog version: which document layout the artifacts are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    /// INI-style `.conf` documents.
    Ini,
    /// YAML `.yaml` documents.
    Yaml,
}

impl ConfigFormat {
    pub const ALL: [Self; 2] = [Self::Ini, Self::Yaml];

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Ini => "conf",
            Self::Yaml => "yaml",
        }
    }

    /// Prepare a substituted value for this format.
    ///
    /// INI values go in verbatim. YAML templates wrap every free-text
    /// placeholder in double quotes, so a YAML value is escaped for a
    /// double-quoted scalar: backslash, quote and control characters.
    pub fn escape(self, value: &str) -> Cow<'_, str> {
        match self {
            Self::Ini => Cow::Borrowed(value),
            Self::Yaml => {
                if !value.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
                    return Cow::Borrowed(value);
                }
                let mut out = String::with_capacity(value.len() + 8);
                for c in value.chars() {
                    match c {
                        '"' => out.push_str("\\\""),
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        c if c.is_control() => {
                            out.push_str(&format!("\\u{:04X}", u32::from(c)));
                        }
                        c => out.push(c),
                    }
                }
                Cow::Owned(out)
            }
        }
    }
}

impl Literal for ConfigFormat {
    const ALLOWED: &'static [&'static str] = &["ini", "yaml"];

    fn from_literal(s: &str) -> Option<Self> {
        match s {
            "ini" => Some(Self::Ini),
            "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Ini => "ini",
            Self::Yaml => "yaml",
        }
    }
}

impl_display_via_literal!(Switch, SearchMode, AuthScheme, LogLevel, ConfigFormat);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_is_case_sensitive() {
        assert_eq!(Switch::from_literal("true"), Some(Switch::True));
        assert_eq!(Switch::from_literal("True"), None);
        assert_eq!(Switch::from_literal("yes"), None);
    }

    #[test]
    fn log_level_accepts_single_digits_only() {
        for digit in 0..=9u8 {
            let lit = digit.to_string();
            let level = LogLevel::from_literal(&lit).unwrap();
            assert_eq!(level.value(), digit);
            assert_eq!(level.to_string(), lit);
        }
        assert!(LogLevel::from_literal("10").is_none());
        assert!(LogLevel::from_literal("-1").is_none());
        assert!(LogLevel::from_literal(" 3").is_none());
    }

    #[test]
    fn parse_for_reports_field() {
        let err = AuthScheme::parse_for("auth_scheme", "ldap").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidEnumValue {
                field: "auth_scheme",
                value: "ldap".into(),
                allowed: &["internal", "iam"],
            }
        );
    }

    #[test]
    fn format_extensions() {
        assert_eq!(ConfigFormat::Ini.extension(), "conf");
        assert_eq!(ConfigFormat::Yaml.extension(), "yaml");
    }

    #[test]
    fn yaml_escape_targets_double_quoted_scalars() {
        let yaml = ConfigFormat::Yaml;
        assert!(matches!(yaml.escape("#s3cret: x"), Cow::Borrowed("#s3cret: x")));
        assert_eq!(yaml.escape(r#"pa"ss\word"#), r#"pa\"ss\\word"#);
        assert_eq!(yaml.escape("a\nb\tc"), r"a\nb\tc");
        assert_eq!(yaml.escape("\u{7}"), r"\u0007");
    }

    #[test]
    fn ini_values_pass_through() {
        assert_eq!(ConfigFormat::Ini.escape(r#"a"b\c"#), r#"a"b\c"#);
    }
}
