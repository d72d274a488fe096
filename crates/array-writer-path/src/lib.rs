//! Bracketed path literals.
//!
//! A path addresses a location inside a tree of nested mappings and sequences.
//! Segments are written in square brackets with no separator:
//! `[level1][0][name]`. A segment holding a decimal integer is an index, any
//! other text is a key. `""`, `"."` and `"[]"` all spell the root.
//!
//! There is no escaping: keys containing `[` or `]` cannot be expressed.
//!
//! # Example
//!
//! ```
//! use array_writer_path::{format_path, parse_path, pathize, Segment};
//!
//! let path = parse_path("[level1][0]").unwrap();
//! assert_eq!(path, vec![Segment::Key("level1".to_string()), Segment::Index(0)]);
//! assert_eq!(format_path(&path), "[level1][0]");
//!
//! assert!(parse_path("[]").unwrap().is_empty());
//! assert_eq!(pathize("wrapper"), "[wrapper]");
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, Segment};

pub mod util;
pub use util::{
    format_path, is_ancestor, is_path_equal, is_root, is_valid_index, parent, parse_path, pathize,
    unpathize, ROOT_LITERALS,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("MALFORMED_PATH: unbalanced brackets in {0:?}")]
    UnbalancedBrackets(String),
    #[error("MALFORMED_PATH: unexpected {found:?} at offset {offset} in {path:?}")]
    UnexpectedCharacter {
        path: String,
        found: char,
        offset: usize,
    },
    #[error("MALFORMED_PATH: empty segment in {0:?}")]
    EmptySegment(String),
    #[error("NO_PARENT")]
    NoParent,
}
