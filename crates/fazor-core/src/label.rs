//! Subscript-aware labels.
//!
//! Phasor annotations follow the electrical-engineering convention of a base
//! symbol with a subscript: `U_R1` reads as "U" with subscript "R1". The
//! underscore in the raw input separates the two parts. Splitting is a pure
//! string transform and has no effect on geometry.

use serde::{Deserialize, Serialize};

/// The separator between base symbol and subscript in raw label input.
pub const SUBSCRIPT_SEPARATOR: char = '_';

/// A display label with an optional subscript.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    base: String,
    subscript: Option<String>,
}

impl Label {
    /// Parses a raw label string, splitting at the first separator.
    ///
    /// Everything before the separator becomes the base symbol and
    /// everything after it becomes the subscript. Strings without a
    /// separator (or with nothing after it) pass through whole, so parsing
    /// an already plain label is a no-op.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(SUBSCRIPT_SEPARATOR) {
            Some((base, subscript)) if !subscript.is_empty() => Self {
                base: base.to_string(),
                subscript: Some(subscript.to_string()),
            },
            _ => Self {
                base: raw.to_string(),
                subscript: None,
            },
        }
    }

    /// Returns the base symbol.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Returns the subscript, if the raw label contained one.
    pub fn subscript(&self) -> Option<&str> {
        self.subscript.as_deref()
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subscript {
            Some(subscript) => write!(f, "{}{SUBSCRIPT_SEPARATOR}{subscript}", self.base),
            None => write!(f, "{}", self.base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_at_separator() {
        let label = Label::parse("U_R1");
        assert_eq!(label.base(), "U");
        assert_eq!(label.subscript(), Some("R1"));
    }

    #[test]
    fn test_parse_without_separator_passes_through() {
        let label = Label::parse("I");
        assert_eq!(label.base(), "I");
        assert_eq!(label.subscript(), None);
    }

    #[test]
    fn test_parse_splits_only_at_first_separator() {
        let label = Label::parse("U_L_1");
        assert_eq!(label.base(), "U");
        assert_eq!(label.subscript(), Some("L_1"));
    }

    #[test]
    fn test_trailing_separator_is_kept_verbatim() {
        let label = Label::parse("U_");
        assert_eq!(label.base(), "U_");
        assert_eq!(label.subscript(), None);
    }

    #[test]
    fn test_parse_is_idempotent_on_plain_strings() {
        let once = Label::parse("V");
        let twice = Label::parse(&once.to_string());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(Label::parse("U_R1").to_string(), "U_R1");
        assert_eq!(Label::parse("V").to_string(), "V");
    }
}
