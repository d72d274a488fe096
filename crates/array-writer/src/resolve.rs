//! Path resolution over parsed [`Segment`] paths.
//!
//! Everything here except [`set`] and [`remove`] is read-only.

use std::mem;

use array_writer_path::{format_path, Segment};

use crate::error::{Result, WriterError};
use crate::value::Value;

/// Outcome of walking a path from the root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// The terminal segment holds a value (possibly null).
    Found(&'a Value),
    /// The parent container exists but has nothing under the terminal segment.
    Vacant,
    /// An ancestor is missing or is not a container.
    Unreachable,
}

impl<'a> Resolution<'a> {
    pub fn value(self) -> Option<&'a Value> {
        match self {
            Resolution::Found(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn is_vacant(&self) -> bool {
        matches!(self, Resolution::Vacant)
    }
}

fn not_readable(path: &[Segment]) -> WriterError {
    WriterError::PathNotReadable(format_path(path))
}

/// Walk `path` and classify the terminal slot.
///
/// The root always resolves to the tree itself.
pub fn resolve<'a>(tree: &'a Value, path: &[Segment]) -> Resolution<'a> {
    let Some((last, parents)) = path.split_last() else {
        return Resolution::Found(tree);
    };

    let mut current = tree;
    for segment in parents {
        match current.get(segment) {
            Some(child) => current = child,
            None => return Resolution::Unreachable,
        }
    }
    let resolution = if !current.is_container() {
        Resolution::Unreachable
    } else {
        match current.get(last) {
            Some(v) => Resolution::Found(v),
            None => Resolution::Vacant,
        }
    };
    tracing::trace!(path = %format_path(path), ?resolution, "resolve");
    resolution
}

/// Value at `path`.
pub fn get<'a>(tree: &'a Value, path: &[Segment]) -> Result<&'a Value> {
    resolve(tree, path).value().ok_or_else(|| not_readable(path))
}

pub fn get_mut<'a>(tree: &'a mut Value, path: &[Segment]) -> Result<&'a mut Value> {
    let mut current = tree;
    for segment in path {
        current = current.get_mut(segment).ok_or_else(|| not_readable(path))?;
    }
    Ok(current)
}

pub fn is_readable(tree: &Value, path: &[Segment]) -> bool {
    resolve(tree, path).is_found()
}

/// True only when the parent container exists and the terminal slot is empty.
///
/// The root is never writable: it always holds a value.
pub fn is_writable(tree: &Value, path: &[Segment]) -> bool {
    !path.is_empty() && resolve(tree, path).is_vacant()
}

/// Assign `value` at `path`, creating missing intermediate containers.
///
/// Assigning at the root replaces the tree. An existing scalar ancestor fails
/// before anything is created.
pub fn set(tree: &mut Value, path: &[Segment], value: Value) -> Result<Option<Value>> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(Some(mem::replace(tree, value)));
    };
    ensure_settable(tree, parents).map_err(|_| not_readable(path))?;

    let mut current = tree;
    for segment in parents {
        if !current.contains_key(segment) {
            current
                .insert(segment.clone(), Value::Sequence(Vec::new()))
                .map_err(|_| not_readable(path))?;
        }
        current = current.get_mut(segment).ok_or_else(|| not_readable(path))?;
    }
    current
        .insert(last.clone(), value)
        .map_err(|_| not_readable(path))
}

fn ensure_settable(tree: &Value, parents: &[Segment]) -> Result<()> {
    let mut current = tree;
    for segment in parents {
        if !current.is_container() {
            return Err(not_readable(parents));
        }
        match current.get(segment) {
            Some(child) => current = child,
            // The rest of the chain will be created
            None => return Ok(()),
        }
    }
    if current.is_container() {
        Ok(())
    } else {
        Err(not_readable(parents))
    }
}

/// Delete the terminal slot of `path` from its parent container.
///
/// Returns the removed value, or `None` when the parent exists but the slot was
/// already empty. The root cannot be removed.
pub fn remove(tree: &mut Value, path: &[Segment]) -> Result<Option<Value>> {
    let Some((last, parents)) = path.split_last() else {
        return Err(WriterError::InvalidArgument(
            "the root cannot be removed".to_string(),
        ));
    };
    let parent = get_mut(tree, parents).map_err(|_| not_readable(path))?;
    if !parent.is_container() {
        return Err(not_readable(path));
    }
    Ok(parent.remove(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use array_writer_path::parse_path;
    use serde_json::json;

    fn tree() -> Value {
        Value::from(json!({
            "a": {"b": [10, 20, null]},
            "s": "scalar",
            "n": null,
        }))
    }

    fn p(literal: &str) -> Vec<Segment> {
        parse_path(literal).unwrap()
    }

    #[test]
    fn test_resolve_three_outcomes() {
        let t = tree();
        assert_eq!(resolve(&t, &p("[a][b][1]")), Resolution::Found(&Value::from(20i64)));
        assert_eq!(resolve(&t, &p("[a][c]")), Resolution::Vacant);
        assert_eq!(resolve(&t, &p("[a][b][3]")), Resolution::Vacant);
        assert_eq!(resolve(&t, &p("[x][y]")), Resolution::Unreachable);
        assert_eq!(resolve(&t, &p("[s][y]")), Resolution::Unreachable);
        assert_eq!(resolve(&t, &p("[n][y]")), Resolution::Unreachable);
    }

    #[test]
    fn test_explicit_null_is_found() {
        let t = tree();
        assert_eq!(resolve(&t, &p("[n]")), Resolution::Found(&Value::Null));
        assert_eq!(get(&t, &p("[a][b][2]")), Ok(&Value::Null));
    }

    #[test]
    fn test_root_resolves_to_tree() {
        let t = tree();
        assert_eq!(get(&t, &[]), Ok(&t));
        assert!(is_readable(&t, &[]));
        assert!(!is_writable(&t, &[]));
    }

    #[test]
    fn test_missing_ancestor_and_scalar_ancestor_agree() {
        let t = tree();
        for literal in ["[x][b]", "[s][b]"] {
            assert!(!is_readable(&t, &p(literal)), "{literal}");
            assert!(!is_writable(&t, &p(literal)), "{literal}");
        }
    }

    #[test]
    fn test_is_writable() {
        let t = tree();
        assert!(is_writable(&t, &p("[new]")));
        assert!(is_writable(&t, &p("[a][b][3]")));
        assert!(!is_writable(&t, &p("[a]")));
        assert!(!is_writable(&t, &p("[n]")));
    }

    #[test]
    fn test_get_not_readable_carries_literal() {
        let t = tree();
        assert_eq!(
            get(&t, &p("[a][zz]")),
            Err(WriterError::PathNotReadable("[a][zz]".to_string()))
        );
    }

    #[test]
    fn test_set_overwrites() {
        let mut t = tree();
        let old = set(&mut t, &p("[s]"), Value::from("new")).unwrap();
        assert_eq!(old, Some(Value::from("scalar")));
        assert_eq!(get(&t, &p("[s]")), Ok(&Value::from("new")));
    }

    #[test]
    fn test_set_creates_intermediates() {
        let mut t = Value::from(json!({}));
        set(&mut t, &p("[x][y][0]"), Value::from(1i64)).unwrap();
        assert_eq!(t, Value::from(json!({"x": {"y": [1]}})));
    }

    #[test]
    fn test_set_through_scalar_fails_untouched() {
        let mut t = tree();
        let before = t.clone();
        let err = set(&mut t, &p("[s][x][y]"), Value::Null).unwrap_err();
        assert_eq!(err, WriterError::PathNotReadable("[s][x][y]".to_string()));
        assert_eq!(t, before);
    }

    #[test]
    fn test_set_root_replaces() {
        let mut t = tree();
        set(&mut t, &[], Value::from("whole")).unwrap();
        assert_eq!(t, Value::from("whole"));
    }

    #[test]
    fn test_remove() {
        let mut t = tree();
        assert_eq!(remove(&mut t, &p("[a][b][2]")), Ok(Some(Value::Null)));
        assert_eq!(remove(&mut t, &p("[a][missing]")), Ok(None));
        assert_eq!(
            remove(&mut t, &p("[zz][b]")),
            Err(WriterError::PathNotReadable("[zz][b]".to_string()))
        );
        assert_eq!(
            remove(&mut t, &p("[s][b]")),
            Err(WriterError::PathNotReadable("[s][b]".to_string()))
        );
        assert!(matches!(remove(&mut t, &[]), Err(WriterError::InvalidArgument(_))));
        assert_eq!(get(&t, &p("[a][b]")), Ok(&Value::from(json!([10, 20]))));
    }
}
