//! array-writer - path-addressed editing of in-memory trees.
//!
//! Trees are [`Value`]s: scalars, sequences, and ordered mappings keyed by
//! integers or strings. [`ArrayWriter`] restructures them with UNIX-like
//! operations addressed by bracketed path literals (see [`array_writer_path`]).
//!
//! # Example
//!
//! ```
//! use array_writer::{ArrayWriter, Value};
//! use serde_json::json;
//!
//! let writer = ArrayWriter::new();
//! let mut tree = Value::from(json!({"level1": ["v1", "v2", "v3"]}));
//!
//! writer.add(&mut tree, "[level1]", "v4".into()).unwrap();
//! writer.mv(&mut tree, "[level1]", "[renamed]").unwrap();
//! writer.rm(&mut tree, "[renamed][0]").unwrap();
//!
//! assert!(!writer.is_readable(&tree, "[level1]"));
//! assert_eq!(writer.get(&tree, "[renamed][3]").unwrap(), &Value::from("v4"));
//! ```

pub mod cli;
pub mod editor;
pub mod error;
pub mod resolve;
pub mod value;

pub use array_writer_path::{self as path, Path, PathError, Segment};
pub use editor::ArrayWriter;
pub use error::{Result, WriterError};
pub use resolve::Resolution;
pub use value::{Mapping, Value};
