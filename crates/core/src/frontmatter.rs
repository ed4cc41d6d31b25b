//! YAML frontmatter: rendering generated pages and reading existing ones.

use crate::error::Result;
use serde::Serialize;
use serde_yaml_ng::{Mapping, Value};

const DELIMITER: &str = "---";

/// Serialize `frontmatter` as YAML and prefix it to `body`
///
/// Field order follows the serialized type, and non-ASCII text is written
/// as-is.
pub fn render<T: Serialize>(frontmatter: &T, body: &str) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(frontmatter)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n\n{body}"))
}

/// Split a document into (frontmatter text, body), both trimmed
///
/// Returns `None` when the document has no frontmatter block.
pub fn split(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix(DELIMITER)?;
    let end = rest.find("\n---")?;
    let front = &rest[..end];
    let body = &rest[end + 1 + DELIMITER.len()..];
    Some((front.trim(), body.trim()))
}

/// Parse a document's frontmatter and return it with the body
///
/// Hand-edited pages sometimes carry frontmatter that is not valid YAML;
/// those fall back to a `key: value` line scan.
pub fn parse(source: &str) -> (Mapping, &str) {
    let Some((front, body)) = split(source) else {
        return (Mapping::new(), source);
    };
    if front.is_empty() {
        return (Mapping::new(), body);
    }
    match serde_yaml_ng::from_str::<Mapping>(front) {
        Ok(map) => (map, body),
        Err(_) => (scan_lines(front), body),
    }
}

fn scan_lines(front: &str) -> Mapping {
    let mut map = Mapping::new();
    for line in front.lines() {
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            map.insert(
                Value::String(key.trim().to_string()),
                Value::String(value.to_string()),
            );
        }
    }
    map
}

/// Scalar value of `key` as a string
pub fn get_str(map: &Mapping, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
