use crate::types::{Path, Segment};
use crate::PathError;

/// The three literals that address the root of a tree.
pub const ROOT_LITERALS: [&str; 3] = ["", ".", "[]"];

/// Check if a literal is one of the root spellings: `""`, `"."` or `"[]"`.
pub fn is_root(literal: &str) -> bool {
    ROOT_LITERALS.contains(&literal)
}

/// Parse a bracketed path literal into segments.
pub fn parse_path(literal: &str) -> Result<Path, PathError> {
    if is_root(literal) {
        return Ok(Vec::new());
    }

    let mut path = Vec::new();
    let mut rest = literal;
    let mut offset = 0;
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            let found = rest.chars().next().unwrap_or_default();
            return Err(PathError::UnexpectedCharacter {
                path: literal.to_string(),
                found,
                offset,
            });
        };
        let end = match inner.find(&['[', ']'][..]) {
            Some(end) if inner.as_bytes()[end] == b']' => end,
            _ => return Err(PathError::UnbalancedBrackets(literal.to_string())),
        };
        let content = &inner[..end];
        if content.is_empty() {
            return Err(PathError::EmptySegment(literal.to_string()));
        }
        path.push(Segment::from_key(content));
        offset += end + 2;
        rest = &inner[end + 1..];
    }
    Ok(path)
}

/// Format segments into a path literal. The root formats as `""`.
pub fn format_path(path: &[Segment]) -> String {
    let mut out = String::new();
    for segment in path {
        out.push('[');
        out.push_str(&segment.to_string());
        out.push(']');
    }
    out
}

/// Wrap a bare key or index in brackets.
pub fn pathize(segment: impl std::fmt::Display) -> String {
    format!("[{segment}]")
}

/// Remove every `[` and `]` from a literal.
pub fn unpathize(literal: &str) -> String {
    literal.replace(&['[', ']'][..], "")
}

/// Get the parent path of a given path.
pub fn parent(path: &[Segment]) -> Result<Path, PathError> {
    match path.split_last() {
        Some((_, init)) => Ok(init.to_vec()),
        None => Err(PathError::NoParent),
    }
}

/// Check if `ancestor` is a strict prefix of `descendant`.
pub fn is_ancestor(ancestor: &[Segment], descendant: &[Segment]) -> bool {
    ancestor.len() < descendant.len() && descendant.starts_with(ancestor)
}

/// Check if two paths are equal.
pub fn is_path_equal(p1: &[Segment], p2: &[Segment]) -> bool {
    p1 == p2
}

/// Check if a string is a non-negative decimal integer without leading zeros.
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}
