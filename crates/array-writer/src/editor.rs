//! [`ArrayWriter`] - UNIX-style editing of a tree addressed by path literals.
//!
//! - `cp`: copy a value to another path, leaving the source intact
//! - `mv`: move a value to another path
//! - `rm`: remove the value at a path
//! - `merge`, `mv_up`, `wrap`, `add`: restructure nodes in place
//!
//! Writes whose destination is the root append into the root with
//! [`Value::union`] instead of assigning, since the root has no slot of its own.

use std::mem;

use array_writer_path::{format_path, parent, parse_path, Segment};

use crate::error::{Result, WriterError};
use crate::resolve;
use crate::value::{Mapping, Value};

/// Stateless editor. Every operation takes the tree it works on, so one
/// instance can serve any number of trees, on any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayWriter;

fn not_readable(path: &[Segment]) -> WriterError {
    WriterError::PathNotReadable(format_path(path))
}

fn overlap(from: &[Segment], to: &[Segment]) -> WriterError {
    WriterError::UnsupportedOverlap {
        from: format_path(from),
        to: format_path(to),
    }
}

impl ArrayWriter {
    pub fn new() -> Self {
        ArrayWriter
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// Value at `path`. The root spellings return the whole tree.
    pub fn get<'a>(&self, tree: &'a Value, path: &str) -> Result<&'a Value> {
        resolve::get(tree, &parse_path(path)?)
    }

    /// Never fails: a malformed literal is simply not readable.
    pub fn is_readable(&self, tree: &Value, path: &str) -> bool {
        parse_path(path).is_ok_and(|path| resolve::is_readable(tree, &path))
    }

    /// True when nothing is stored at `path` yet but its parent container exists.
    pub fn is_writable(&self, tree: &Value, path: &str) -> bool {
        parse_path(path).is_ok_and(|path| resolve::is_writable(tree, &path))
    }

    pub fn is_root(&self, path: &str) -> bool {
        array_writer_path::is_root(path)
    }

    /// True when `path` is readable and holds a mapping or sequence.
    pub fn is_node(&self, tree: &Value, path: &str) -> bool {
        self.get(tree, path).is_ok_and(Value::is_container)
    }

    /// Literal of the parent of `path`. A single segment's parent is the root, `""`.
    pub fn parent_path(&self, path: &str) -> Result<String> {
        let path = parse_path(path)?;
        let parent = parent(&path)
            .map_err(|_| WriterError::InvalidArgument("the root has no parent".to_string()))?;
        Ok(format_path(&parent))
    }

    /// First top-level value whose key contains `search`, ignoring case.
    pub fn get_by_partial_key<'a>(&self, tree: &'a Value, search: &str) -> Option<&'a Value> {
        let needle = search.to_lowercase();
        tree.entries()
            .find(|(key, _)| key.to_string().to_lowercase().contains(&needle))
            .map(|(_, value)| value)
    }

    /// Search every level for a container holding `key` directly.
    pub fn key_exists_nested(&self, tree: &Value, key: &str) -> bool {
        fn walk(node: &Value, key: &Segment) -> bool {
            if node.contains_key(key) {
                return true;
            }
            node.entries()
                .any(|(_, child)| child.is_container() && walk(child, key))
        }
        walk(tree, &Segment::from_key(key))
    }

    // ── Single-path edits ────────────────────────────────────────────────

    /// Replace the value at `path`, or the whole tree for the root.
    ///
    /// Only existing locations can be edited.
    pub fn edit(&self, tree: &mut Value, path: &str, value: Value) -> Result<()> {
        let path = parse_path(path)?;
        *resolve::get_mut(tree, &path)? = value;
        Ok(())
    }

    /// Append `value` to the node at `to`.
    ///
    /// A scalar already at `to` is first turned into a one-element sequence so
    /// it is preserved.
    pub fn add(&self, tree: &mut Value, to: &str, value: Value) -> Result<()> {
        self.add_with_keys(tree, to, value, "", "")
    }

    /// Like [`ArrayWriter::add`], naming the new and preserved values.
    ///
    /// A non-empty `new_value_key` assigns under that key and silently
    /// replaces whatever is already stored there. A non-empty `old_value_key`
    /// keys the preserved scalar instead of indexing it.
    pub fn add_with_keys(
        &self,
        tree: &mut Value,
        to: &str,
        value: Value,
        new_value_key: &str,
        old_value_key: &str,
    ) -> Result<()> {
        let to_path = parse_path(to)?;
        let slot = resolve::get_mut(tree, &to_path)?;
        tracing::debug!(to, new_value_key, old_value_key, "add");
        let mut node = match mem::take(slot) {
            current if current.is_container() => current,
            current if old_value_key.is_empty() => Value::Sequence(vec![current]),
            current => Value::Mapping(Mapping::from([(Segment::from_key(old_value_key), current)])),
        };
        let appended = if new_value_key.is_empty() {
            node.push(value)
        } else {
            let key = Segment::from_key(&Self::unpathize(new_value_key));
            node.insert(key, value).map(drop)
        };
        *slot = node;
        appended.map_err(|_| {
            WriterError::InvalidArgument(format!("{to:?} has no free integer key"))
        })
    }

    /// Remove the value at `path`, returning it.
    ///
    /// An empty slot in an existing container is left alone and yields `None`.
    /// The root cannot be removed; check [`ArrayWriter::is_root`] first.
    pub fn rm(&self, tree: &mut Value, path: &str) -> Result<Option<Value>> {
        let path_segments = parse_path(path)?;
        tracing::debug!(path, "rm");
        resolve::remove(tree, &path_segments)
    }

    /// Read the value at `path` and remove it. The root is returned without
    /// being removed.
    pub fn get_and_forget(&self, tree: &mut Value, path: &str) -> Result<Value> {
        let path_segments = parse_path(path)?;
        if path_segments.is_empty() {
            return Ok(tree.clone());
        }
        if !resolve::is_readable(tree, &path_segments) {
            return Err(not_readable(&path_segments));
        }
        tracing::debug!(path, "get_and_forget");
        resolve::remove(tree, &path_segments)?.ok_or_else(|| not_readable(&path_segments))
    }

    /// Replace the value at `path` with `{wrapper_key: value}`.
    ///
    /// Brackets in `wrapper_key` are dropped, so `"[root]"` and `"root"` agree.
    pub fn wrap(&self, tree: &mut Value, path: &str, wrapper_key: &str) -> Result<()> {
        let path_segments = parse_path(path)?;
        let key = Segment::from_key(&Self::unpathize(wrapper_key));
        let slot = resolve::get_mut(tree, &path_segments)?;
        tracing::debug!(path, wrapper_key, "wrap");
        let inner = mem::take(slot);
        *slot = Value::Mapping(Mapping::from([(key, inner)]));
        Ok(())
    }

    // ── Two-path edits ───────────────────────────────────────────────────

    /// Copy the value at `from` to `to`, replacing anything already there.
    ///
    /// Copying to the root appends into the root instead.
    pub fn cp(&self, tree: &mut Value, from: &str, to: &str) -> Result<()> {
        let from_path = parse_path(from)?;
        let to_path = parse_path(to)?;
        tracing::debug!(from, to, "cp");
        self.copy_value(tree, &from_path, &to_path)
    }

    /// Copy that refuses to replace: `to` must be writable.
    pub fn cp_safe(&self, tree: &mut Value, from: &str, to: &str) -> Result<()> {
        let from_path = parse_path(from)?;
        let to_path = parse_path(to)?;
        if !resolve::is_writable(tree, &to_path) {
            return Err(WriterError::PathNotWritable(format_path(&to_path)));
        }
        tracing::debug!(from, to, "cp_safe");
        self.copy_value(tree, &from_path, &to_path)
    }

    /// `cp` followed by `rm` of the source.
    ///
    /// Moving to the root takes the source out first, then appends it into
    /// the root.
    pub fn mv(&self, tree: &mut Value, from: &str, to: &str) -> Result<()> {
        let from_path = parse_path(from)?;
        let to_path = parse_path(to)?;
        check_move(&from_path, &to_path)?;
        tracing::debug!(from, to, "mv");
        self.move_value(tree, &from_path, &to_path)
    }

    /// `cp_safe` followed by `rm` of the source.
    pub fn mv_safe(&self, tree: &mut Value, from: &str, to: &str) -> Result<()> {
        let from_path = parse_path(from)?;
        let to_path = parse_path(to)?;
        check_move(&from_path, &to_path)?;
        if !resolve::is_writable(tree, &to_path) {
            return Err(WriterError::PathNotWritable(format_path(&to_path)));
        }
        tracing::debug!(from, to, "mv_safe");
        self.move_value(tree, &from_path, &to_path)
    }

    /// Remove the value at `from` and append it into the node at `into`.
    ///
    /// Both are array-coerced first, so scalars merge as single entries.
    pub fn merge(&self, tree: &mut Value, from: &str, into: &str) -> Result<()> {
        let from_path = parse_path(from)?;
        let into_path = parse_path(into)?;
        if into_path.starts_with(&from_path) {
            return Err(overlap(&from_path, &into_path));
        }
        if !resolve::is_readable(tree, &from_path) {
            return Err(not_readable(&from_path));
        }
        if !resolve::is_readable(tree, &into_path) {
            return Err(not_readable(&into_path));
        }
        tracing::debug!(from, into, "merge");
        let value = resolve::remove(tree, &from_path)?.ok_or_else(|| not_readable(&from_path))?;
        let slot = resolve::get_mut(tree, &into_path)?;
        let into_value = mem::take(slot);
        *slot = into_value.union(value);
        Ok(())
    }

    /// Splice the children of the node at `path` into its parent and drop the
    /// node itself.
    pub fn mv_up(&self, tree: &mut Value, path: &str) -> Result<()> {
        let path_segments = parse_path(path)?;
        let parent_path = parent(&path_segments).map_err(|_| {
            WriterError::InvalidArgument("the root has no parent to move into".to_string())
        })?;
        if !resolve::is_readable(tree, &path_segments) {
            return Err(not_readable(&path_segments));
        }
        tracing::debug!(path, "mv_up");
        let parent_is_sequence = matches!(
            resolve::get(tree, &parent_path)?,
            Value::Sequence(_)
        );
        let value =
            resolve::remove(tree, &path_segments)?.ok_or_else(|| not_readable(&path_segments))?;
        let slot = resolve::get_mut(tree, &parent_path)?;
        let parent_value = match mem::take(slot) {
            // Removing an interior element left gaps; close them again
            Value::Mapping(map) if parent_is_sequence => {
                Value::Sequence(map.into_values().collect())
            }
            other => other,
        };
        *slot = parent_value.union(value);
        Ok(())
    }

    fn copy_value(&self, tree: &mut Value, from: &[Segment], to: &[Segment]) -> Result<()> {
        let value = resolve::get(tree, from)?.clone();
        if to.is_empty() {
            let root = mem::take(tree);
            *tree = root.union(value);
            return Ok(());
        }
        resolve::set(tree, to, value).map(drop)
    }

    fn move_value(&self, tree: &mut Value, from: &[Segment], to: &[Segment]) -> Result<()> {
        if !to.is_empty() {
            self.copy_value(tree, from, to)?;
            return resolve::remove(tree, from).map(drop);
        }
        // The union renumbers integer keys of the root, which can shift `from`
        if !resolve::is_readable(tree, from) {
            return Err(not_readable(from));
        }
        let value = resolve::remove(tree, from)?.ok_or_else(|| not_readable(from))?;
        let root = mem::take(tree);
        *tree = root.union(value);
        Ok(())
    }

    // ── Literal helpers ──────────────────────────────────────────────────

    /// `"name"` → `"[name]"`.
    pub fn pathize(segment: impl std::fmt::Display) -> String {
        array_writer_path::pathize(segment)
    }

    /// `"[name]"` → `"name"`.
    pub fn unpathize(literal: &str) -> String {
        array_writer_path::unpathize(literal)
    }
}

/// A move may not land inside its own source, nor on one of the source's
/// ancestors other than the root.
fn check_move(from: &[Segment], to: &[Segment]) -> Result<()> {
    let into_source = to.starts_with(from);
    let onto_ancestor = !to.is_empty() && from.starts_with(to);
    if into_source || onto_ancestor {
        return Err(overlap(from, to));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn val(v: serde_json::Value) -> Value {
        Value::from(v)
    }

    fn levels() -> Value {
        val(json!({
            "level1": ["value 1.1", "value 1.2", "value 1.3"],
            "level2": {"key1": "value 2.1", "0": "value 2.2", "1": "value 2.3"},
        }))
    }

    #[test]
    fn test_get() {
        let w = ArrayWriter::new();
        let t = levels();
        assert_eq!(
            w.get(&t, "[level1]"),
            Ok(&val(json!(["value 1.1", "value 1.2", "value 1.3"])))
        );
        assert_eq!(w.get(&t, "[level2][key1]"), Ok(&Value::from("value 2.1")));
        assert_eq!(w.get(&t, ""), Ok(&t));
        assert!(matches!(w.get(&t, "[level1"), Err(WriterError::MalformedPath(_))));
    }

    #[test]
    fn test_is_readable_never_fails() {
        let w = ArrayWriter::new();
        let t = levels();
        assert!(w.is_readable(&t, "[level1]"));
        assert!(w.is_readable(&t, "."));
        assert!(!w.is_readable(&t, "[non-existent]"));
        assert!(!w.is_readable(&t, "[[broken"));
    }

    #[test]
    fn test_is_writable() {
        let w = ArrayWriter::new();
        let t = levels();
        assert!(w.is_writable(&t, "[level3]"));
        assert!(w.is_writable(&t, "[level1][3]"));
        assert!(!w.is_writable(&t, "[level1]"));
        assert!(!w.is_writable(&t, "[]"));
        assert!(!w.is_writable(&t, "[missing][x]"));
        assert!(!w.is_writable(&t, "[level1][0][x]"));
    }

    #[test]
    fn test_is_node() {
        let w = ArrayWriter::new();
        let t = levels();
        assert!(w.is_node(&t, "[level1]"));
        assert!(w.is_node(&t, ""));
        assert!(!w.is_node(&t, "[level1][0]"));
        assert!(!w.is_node(&t, "[missing]"));
    }

    #[test]
    fn test_parent_path() {
        let w = ArrayWriter::new();
        assert_eq!(w.parent_path("[a][b][0]"), Ok("[a][b]".to_string()));
        assert_eq!(w.parent_path("[a]"), Ok(String::new()));
        assert!(matches!(w.parent_path("[]"), Err(WriterError::InvalidArgument(_))));
    }

    #[test]
    fn test_get_by_partial_key() {
        let w = ArrayWriter::new();
        let t = val(json!({"Alpha": 1, "beta": 2, "alphabet": 3}));
        assert_eq!(w.get_by_partial_key(&t, "ALP"), Some(&Value::from(1i64)));
        assert_eq!(w.get_by_partial_key(&t, "bet"), Some(&Value::from(2i64)));
        assert_eq!(w.get_by_partial_key(&t, "gamma"), None);
        assert_eq!(w.get_by_partial_key(&Value::from("x"), "x"), None);
    }

    #[test]
    fn test_get_by_partial_key_is_first_level_only() {
        let w = ArrayWriter::new();
        let t = val(json!({"outer": {"needle": 1}}));
        assert_eq!(w.get_by_partial_key(&t, "needle"), None);
    }

    #[test]
    fn test_edit_requires_existing_location() {
        let w = ArrayWriter::new();
        let mut t = levels();
        let before = t.clone();
        let err = w.edit(&mut t, "[non-existent]", Value::Null).unwrap_err();
        assert_eq!(err, WriterError::PathNotReadable("[non-existent]".to_string()));
        assert_eq!(t, before);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logged(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_edits_log_only_after_validation() {
        let w = ArrayWriter::new();
        let mut t = levels();

        let out = logged(|| {
            assert!(w.add(&mut t, "[missing]", Value::Null).is_err());
            assert!(w.wrap(&mut t, "[missing]", "k").is_err());
        });
        assert_eq!(out, "");

        let out = logged(|| w.add(&mut t, "[level1]", "v".into()).unwrap());
        assert!(out.contains("add"), "{out}");
    }

    #[test]
    fn test_check_move() {
        let a = parse_path("[a]").unwrap();
        let ab = parse_path("[a][b]").unwrap();
        assert!(check_move(&a, &ab).is_err());
        assert!(check_move(&ab, &a).is_err());
        assert!(check_move(&a, &a).is_err());
        assert!(check_move(&ab, &[]).is_ok());
        assert!(check_move(&[], &a).is_err());
        assert!(check_move(&a, &parse_path("[c]").unwrap()).is_ok());
    }
}
