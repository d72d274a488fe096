//! Type definitions for bracketed paths.

use std::fmt;

use crate::util::is_valid_index;

/// A step in a bracketed path.
///
/// Either a mapping key or a sequence index. The same type doubles as the key
/// type of mappings, so `[0]` addresses both the first element of a sequence
/// and the `0` entry of a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Non-negative integer index.
    Index(usize),
    /// String key.
    Key(String),
}

/// A parsed path. The empty path is the root.
pub type Path = Vec<Segment>;

impl Segment {
    /// Build a segment from raw text.
    ///
    /// Decimal integers without leading zeros become [`Segment::Index`],
    /// anything else is kept as a [`Segment::Key`].
    ///
    /// # Example
    ///
    /// ```
    /// use array_writer_path::Segment;
    ///
    /// assert_eq!(Segment::from_key("3"), Segment::Index(3));
    /// assert_eq!(Segment::from_key("03"), Segment::Key("03".to_string()));
    /// assert_eq!(Segment::from_key("level1"), Segment::Key("level1".to_string()));
    /// ```
    pub fn from_key(text: &str) -> Segment {
        if is_valid_index(text) {
            if let Ok(idx) = text.parse() {
                return Segment::Index(idx);
            }
        }
        Segment::Key(text.to_string())
    }

    /// Returns the index if this is an index segment.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(idx) => Some(*idx),
            Segment::Key(_) => None,
        }
    }

    /// True for [`Segment::Index`].
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(idx) => write!(f, "{idx}"),
            Segment::Key(key) => f.write_str(key),
        }
    }
}

impl From<usize> for Segment {
    fn from(idx: usize) -> Self {
        Segment::Index(idx)
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        Segment::from_key(text)
    }
}

impl From<String> for Segment {
    fn from(text: String) -> Self {
        Segment::from_key(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_canonicalises_indices() {
        assert_eq!(Segment::from_key("0"), Segment::Index(0));
        assert_eq!(Segment::from_key("42"), Segment::Index(42));
        assert_eq!(Segment::from_key("-1"), Segment::Key("-1".to_string()));
        assert_eq!(Segment::from_key("1.5"), Segment::Key("1.5".to_string()));
        assert_eq!(Segment::from_key(""), Segment::Key(String::new()));
    }

    #[test]
    fn test_from_key_overflow_stays_key() {
        let huge = "9".repeat(64);
        assert_eq!(Segment::from_key(&huge), Segment::Key(huge.clone()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Segment::Index(7).to_string(), "7");
        assert_eq!(Segment::Key("foo".to_string()).to_string(), "foo");
    }

    #[test]
    fn test_as_index() {
        assert_eq!(Segment::Index(2).as_index(), Some(2));
        assert_eq!(Segment::from("k").as_index(), None);
        assert!(Segment::from(2usize).is_index());
    }
}
