//! Conversion of a generic [`Node`] tree into a canonical JSON tree
//!
//! The canonical tree only contains string-keyed objects, arrays and JSON
//! scalars, so it can always be encoded as strict JSON. Key stringification:
//!
//! | key                  | text                                   |
//! |----------------------|----------------------------------------|
//! | string               | unchanged                              |
//! | bool / int / null    | YAML form: `true`, `42`, `null`        |
//! | float                | `1.5`, `2.0`, `.inf`, `-.inf`, `.nan`  |
//! | bytes                | standard base64                        |
//! | tagged               | the inner value's key text             |
//! | sequence / mapping   | compact JSON of the normalized key     |
//!
//! Scalars that JSON cannot carry become strings: non-finite floats, byte
//! strings (base64) and integers outside the 64-bit range. Tags are dropped.
//!
//! Merge keys (`<<: *base`) are expanded: the referenced mapping, or each
//! mapping of a referenced sequence, contributes the keys that the mapping
//! does not set itself.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};
use crate::path::FieldPath;
use crate::tree::Node;

/// Normalize a document tree.
///
/// Fails with [`Error::DuplicateKey`] when two keys of one mapping produce the
/// same text, e.g. `1` and `"1"`.
pub fn normalize(node: &Node) -> Result<Value> {
    let mut path = FieldPath::root();
    normalize_at(node, &mut path)
}

fn normalize_at(node: &Node, path: &mut FieldPath) -> Result<Value> {
    Ok(match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Integer(i) => integer_to_json(*i),
        Node::Float(f) => Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(float_text(*f))),
        Node::String(s) => Value::String(s.clone()),
        Node::Bytes(bytes) => Value::String(STANDARD.encode(bytes)),
        Node::Sequence(items) => {
            let mut normalized = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push_index(index);
                normalized.push(normalize_at(item, path)?);
                path.pop();
            }
            Value::Array(normalized)
        }
        Node::Mapping(entries) => {
            let mut object = Map::new();
            let mut merge = None;
            for (key, value) in entries {
                if is_merge_key(key) {
                    if merge.replace(value).is_some() {
                        return Err(Error::duplicate_key(&*path, MERGE_KEY));
                    }
                    continue;
                }
                let key = key_text(key, path)?;
                if object.contains_key(&key) {
                    return Err(Error::duplicate_key(&*path, key));
                }
                path.push_key(key.clone());
                let value = normalize_at(value, path)?;
                path.pop();
                object.insert(key, value);
            }
            if let Some(source) = merge {
                path.push_key(MERGE_KEY);
                let merged = merge_sources(source, path);
                path.pop();
                for (key, value) in merged? {
                    object.entry(key).or_insert(value);
                }
            }
            Value::Object(object)
        }
        Node::Tagged { value, .. } => normalize_at(value, path)?,
    })
}

const MERGE_KEY: &str = "<<";

fn is_merge_key(key: &Node) -> bool {
    matches!(key, Node::String(s) if s == MERGE_KEY)
}

/// Entries pulled in by a `<<` key, earliest source first.
///
/// The source is a mapping or a sequence of mappings; for a sequence, a key
/// from an earlier mapping wins over the same key further down.
fn merge_sources(source: &Node, path: &mut FieldPath) -> Result<Vec<(String, Value)>> {
    let not_a_mapping = |path: &FieldPath, found: &Value| Error::Normalization {
        path: path.to_string(),
        message: format!(
            "merge key expects a mapping or a sequence of mappings, found {}",
            json_kind(found)
        ),
    };

    match normalize_at(source, path)? {
        Value::Object(object) => Ok(object.into_iter().collect()),
        Value::Array(items) => {
            let mut entries = Vec::new();
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(object) => entries.extend(object),
                    other => return Err(not_a_mapping(&path.index(index), &other)),
                }
            }
            Ok(entries)
        }
        other => Err(not_a_mapping(&*path, &other)),
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

fn integer_to_json(i: i128) -> Value {
    if let Ok(signed) = i64::try_from(i) {
        Value::Number(signed.into())
    } else if let Ok(unsigned) = u64::try_from(i) {
        Value::Number(unsigned.into())
    } else {
        Value::String(i.to_string())
    }
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        ".nan".to_string()
    } else if f == f64::INFINITY {
        ".inf".to_string()
    } else if f == f64::NEG_INFINITY {
        "-.inf".to_string()
    } else {
        // Keeps the fraction on integral values: `1.0`, not `1`.
        Number::from_f64(f).map_or_else(|| f.to_string(), |n| n.to_string())
    }
}

/// String form of a mapping key
fn key_text(key: &Node, path: &mut FieldPath) -> Result<String> {
    Ok(match key {
        Node::String(s) => s.clone(),
        Node::Null => "null".to_string(),
        Node::Bool(b) => b.to_string(),
        Node::Integer(i) => i.to_string(),
        Node::Float(f) => float_text(*f),
        Node::Bytes(bytes) => STANDARD.encode(bytes),
        Node::Tagged { value, .. } => key_text(value, path)?,
        Node::Sequence(_) | Node::Mapping(_) => {
            let normalized = normalize_at(key, path)?;
            serde_json::to_string(&normalized).map_err(|e| Error::Normalization {
                path: path.to_string(),
                message: format!("cannot render {} key as text: {e}", key.kind()),
            })?
        }
    })
}
