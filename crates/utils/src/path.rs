//! Dotted-path access into JSON values
//!
//! Paths look like `"user.address.city"`. A segment that parses as an integer
//! indexes into arrays; on objects it is an ordinary key.

use flowchain_core::{Error, Result, PATH_SEPARATOR};
use serde_json::{Map, Value};

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR)
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Whether `path` resolves to a value (a present `null` counts)
#[must_use]
pub fn has(value: &Value, path: &str) -> bool {
    get(value, path).is_some()
}

/// Resolve `path` inside `value`
#[must_use]
pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    segments(path).try_fold(value, child)
}

/// Write `new_value` at `path`, creating intermediate objects as needed
///
/// `null` intermediates are replaced by objects. Array segments may address an
/// existing element or append at exactly `len`.
pub fn set(value: &mut Value, path: &str, new_value: Value) -> Result<()> {
    if path.is_empty() {
        return Err(Error::path(path, "path must not be empty"));
    }

    let mut current = value;
    let mut parts = segments(path).peekable();

    while let Some(segment) = parts.next() {
        let is_last = parts.peek().is_none();

        if current.is_null() {
            *current = Value::Object(Map::new());
        }

        current = match current {
            Value::Object(map) => {
                if is_last {
                    map.insert(segment.to_string(), new_value);
                    return Ok(());
                }
                map.entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()))
            }
            Value::Array(items) => {
                let index = segment.parse::<usize>().map_err(|_| {
                    Error::path(path, format!("segment '{segment}' is not an array index"))
                })?;
                if index == items.len() {
                    items.push(Value::Null);
                }
                let len = items.len();
                let slot = items.get_mut(index).ok_or_else(|| {
                    Error::path(
                        path,
                        format!("index {index} is out of bounds for array of length {len}"),
                    )
                })?;
                if is_last {
                    *slot = new_value;
                    return Ok(());
                }
                slot
            }
            scalar => {
                return Err(Error::path(
                    path,
                    format!("cannot descend into {} at '{segment}'", kind_of(scalar)),
                ))
            }
        };
    }

    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
