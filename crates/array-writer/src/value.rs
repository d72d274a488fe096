//! [`Value`] - the tree model every operation works on.
//!
//! A value is a scalar, an ordered sequence, or an ordered mapping whose keys
//! are [`Segment`]s (integer or string). Mappings may mix both kinds of key.

use std::fmt;
use std::mem;

use array_writer_path::Segment;
use indexmap::IndexMap;
use serde_json::Number;

/// Ordered mapping from segment keys to values.
pub type Mapping = IndexMap<Segment, Value>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Densely indexed list, `0..len`.
    Sequence(Vec<Value>),
    /// Ordered key-value pairs.
    Mapping(Mapping),
}

impl Value {
    /// Mapping or sequence.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Sequence(_) | Value::Mapping(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Number of direct children. Scalars have none.
    pub fn len(&self) -> usize {
        match self {
            Value::Sequence(items) => items.len(),
            Value::Mapping(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct child under `segment`.
    pub fn get(&self, segment: &Segment) -> Option<&Value> {
        match (self, segment) {
            (Value::Sequence(items), Segment::Index(idx)) => items.get(*idx),
            (Value::Mapping(map), _) => map.get(segment),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, segment: &Segment) -> Option<&mut Value> {
        match (self, segment) {
            (Value::Sequence(items), Segment::Index(idx)) => items.get_mut(*idx),
            (Value::Mapping(map), _) => map.get_mut(segment),
            _ => None,
        }
    }

    pub fn contains_key(&self, segment: &Segment) -> bool {
        self.get(segment).is_some()
    }

    /// Iterate direct children with their keys, in order.
    pub fn entries(&self) -> Box<dyn Iterator<Item = (Segment, &Value)> + '_> {
        match self {
            Value::Sequence(items) => Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, v)| (Segment::Index(idx), v)),
            ),
            Value::Mapping(map) => Box::new(map.iter().map(|(k, v)| (k.clone(), v))),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Write `value` under `segment`, returning the value it replaced.
    ///
    /// Writing index `len` onto a sequence appends. Any other write that a
    /// dense sequence cannot hold (a gap, or a string key) turns the sequence
    /// into a mapping keyed by its indices first.
    ///
    /// Scalars have no children; the value is handed back as `Err`.
    pub fn insert(&mut self, segment: Segment, value: Value) -> Result<Option<Value>, Value> {
        match self {
            Value::Sequence(items) => match segment {
                Segment::Index(idx) if idx < items.len() => {
                    Ok(Some(mem::replace(&mut items[idx], value)))
                }
                Segment::Index(idx) if idx == items.len() => {
                    items.push(value);
                    Ok(None)
                }
                segment => {
                    let mut map = sequence_to_mapping(mem::take(items));
                    let old = map.insert(segment, value);
                    *self = Value::Mapping(map);
                    Ok(old)
                }
            },
            Value::Mapping(map) => Ok(map.insert(segment, value)),
            _ => Err(value),
        }
    }

    /// Append `value` positionally.
    ///
    /// Mappings receive it under the next free integer key. A mapping whose
    /// largest integer key is `usize::MAX` has none left, and the value is
    /// handed back as `Err`.
    pub fn push(&mut self, value: Value) -> Result<(), Value> {
        match self {
            Value::Sequence(items) => {
                items.push(value);
                Ok(())
            }
            Value::Mapping(map) => {
                let next = match map.keys().filter_map(Segment::as_index).max() {
                    Some(idx) => match idx.checked_add(1) {
                        Some(next) => next,
                        None => return Err(value),
                    },
                    None => 0,
                };
                map.insert(Segment::Index(next), value);
                Ok(())
            }
            _ => Err(value),
        }
    }

    /// Delete the child under `segment`.
    ///
    /// Popping the last element keeps a sequence dense. Removing any other
    /// element turns the sequence into a mapping so the remaining elements
    /// keep their indices.
    pub fn remove(&mut self, segment: &Segment) -> Option<Value> {
        match self {
            Value::Sequence(items) => {
                let idx = segment.as_index()?;
                if items.len().checked_sub(1) == Some(idx) {
                    return items.pop();
                }
                if idx >= items.len() {
                    return None;
                }
                let mut map = sequence_to_mapping(mem::take(items));
                let removed = map.shift_remove(segment);
                *self = Value::Mapping(map);
                removed
            }
            Value::Mapping(map) => map.shift_remove(segment),
            _ => None,
        }
    }

    /// Containers pass through; anything else becomes a one-element sequence.
    pub fn force_array(self) -> Value {
        if self.is_container() {
            self
        } else {
            Value::Sequence(vec![self])
        }
    }

    /// Concatenate the entries of `self` and `other`, both array-coerced.
    ///
    /// Onto a sequence, the entries of `other` are appended positionally and
    /// their keys dropped. Onto a mapping, integer keys are renumbered in
    /// visiting order and string keys are inserted by key, so a later entry
    /// replaces an earlier one in place. A mapping result with only integer
    /// keys comes back as a sequence.
    pub fn union(self, other: Value) -> Value {
        match (self.force_array(), other.force_array()) {
            (Value::Sequence(mut left), right) => {
                left.extend(right.into_entries().into_iter().map(|(_, v)| v));
                Value::Sequence(left)
            }
            (left, right) => {
                let mut merged = Mapping::new();
                let mut next = 0;
                for (segment, value) in left.into_entries().into_iter().chain(right.into_entries()) {
                    match segment {
                        Segment::Index(_) => {
                            merged.insert(Segment::Index(next), value);
                            next += 1;
                        }
                        key => {
                            merged.insert(key, value);
                        }
                    }
                }
                if merged.keys().all(Segment::is_index) {
                    Value::Sequence(merged.into_values().collect())
                } else {
                    Value::Mapping(merged)
                }
            }
        }
    }

    fn into_entries(self) -> Vec<(Segment, Value)> {
        match self {
            Value::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(idx, v)| (Segment::Index(idx), v))
                .collect(),
            Value::Mapping(map) => map.into_iter().collect(),
            scalar => vec![(Segment::Index(0), scalar)],
        }
    }
}

fn sequence_to_mapping(items: Vec<Value>) -> Mapping {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, v)| (Segment::Index(idx), v))
        .collect()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", serde_json::Value::from(self.clone()))
    }
}

// ── JSON interop ──────────────────────────────────────────────────────────

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Sequence(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Mapping(
                obj.into_iter()
                    .map(|(k, v)| (Segment::from_key(&k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Value::Number(n),
            Value::String(s) => serde_json::Value::String(s),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Mapping(map)
    }
}
