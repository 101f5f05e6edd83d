//! Parsed user location input

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of digits in a US ZIP code
const ZIP_LENGTH: usize = 5;

/// A non-empty location entered by the user
///
/// Input made of exactly five ASCII digits is a ZIP code; anything else is
/// a free-text address or place name.
///
/// # Examples
///
/// ```
/// use domain::value_objects::LocationQuery;
///
/// assert!(matches!(LocationQuery::parse("19103"), Some(LocationQuery::Zip(_))));
/// assert!(matches!(LocationQuery::parse("Philadelphia, PA"), Some(LocationQuery::FreeText(_))));
/// assert!(LocationQuery::parse("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LocationQuery {
    /// Five-digit US ZIP code
    Zip(String),
    /// Free-text address or place
    FreeText(String),
}

impl LocationQuery {
    /// Classify raw input, returning `None` when it is empty after trimming
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        if is_zip(trimmed) {
            Some(Self::Zip(trimmed.to_string()))
        } else {
            Some(Self::FreeText(trimmed.to_string()))
        }
    }

    /// The query text
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Zip(s) | Self::FreeText(s) => s,
        }
    }

    /// Coarser query to retry with when free text finds nothing
    ///
    /// The part after the first comma, trimmed. Street-level addresses such as
    /// "123 Fake St, Springfield" degrade to "Springfield", trading precision
    /// for recall. `None` for ZIP codes, input without a comma, or an empty tail.
    #[must_use]
    pub fn fallback(&self) -> Option<&str> {
        let Self::FreeText(text) = self else {
            return None;
        };
        let (_, tail) = text.split_once(',')?;
        let tail = tail.trim();
        (!tail.is_empty()).then_some(tail)
    }
}

fn is_zip(s: &str) -> bool {
    s.len() == ZIP_LENGTH && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_digits_is_zip() {
        assert_eq!(
            LocationQuery::parse(" 19103 "),
            Some(LocationQuery::Zip("19103".to_string()))
        );
    }

    #[test]
    fn other_digit_counts_are_free_text() {
        assert!(matches!(
            LocationQuery::parse("1910"),
            Some(LocationQuery::FreeText(_))
        ));
        assert!(matches!(
            LocationQuery::parse("191034"),
            Some(LocationQuery::FreeText(_))
        ));
        assert!(matches!(
            LocationQuery::parse("19103-1234"),
            Some(LocationQuery::FreeText(_))
        ));
    }

    #[test]
    fn non_ascii_digits_are_not_zip() {
        assert!(matches!(
            LocationQuery::parse("١٢٣٤٥"),
            Some(LocationQuery::FreeText(_))
        ));
    }

    #[test]
    fn empty_input_is_none() {
        assert!(LocationQuery::parse("").is_none());
        assert!(LocationQuery::parse("\t \n").is_none());
    }

    #[test]
    fn fallback_takes_text_after_first_comma() {
        let q = LocationQuery::parse("123 Fake St, Springfield").expect("non-empty");
        assert_eq!(q.fallback(), Some("Springfield"));

        let q = LocationQuery::parse("1 Main St, Boulder, CO").expect("non-empty");
        assert_eq!(q.fallback(), Some("Boulder, CO"));
    }

    #[test]
    fn fallback_absent_without_comma_or_tail() {
        let q = LocationQuery::parse("Springfield").expect("non-empty");
        assert_eq!(q.fallback(), None);

        let q = LocationQuery::parse("Springfield,  ").expect("non-empty");
        assert_eq!(q.fallback(), None);

        let q = LocationQuery::parse("19103").expect("non-empty");
        assert_eq!(q.fallback(), None);
    }

    #[test]
    fn display_is_query_text() {
        let q = LocationQuery::parse("Boulder, CO").expect("non-empty");
        assert_eq!(q.to_string(), "Boulder, CO");
    }
}
