//! Read-modify-write over a nested property
//!
//! This is not a real lens: every call deep-copies the whole input, reads the
//! old value at the path and writes the new one into the copy. The input is
//! never touched.

use crate::path;
use flowchain_core::Result;
use serde_json::Value;

/// Produce a copy of `input` with the value at `key` replaced by `f(old)`
///
/// `null` input yields `null`. When `key` does not resolve, the copy is
/// returned unchanged and `f` is not called.
pub fn over<F>(input: &Value, key: &str, f: F) -> Result<Value>
where
    F: FnOnce(&Value) -> Value,
{
    if input.is_null() {
        return Ok(Value::Null);
    }

    let mut copy = input.clone();
    let Some(old) = path::get(&copy, key) else {
        return Ok(copy);
    };
    let new_value = f(old);
    path::set(&mut copy, key, new_value)?;

    Ok(copy)
}

/// Curried form of [`over`], ready to be used as a pipeline transform
pub fn lens_over<F>(key: impl Into<String>, f: F) -> impl Fn(&Value) -> Result<Value>
where
    F: Fn(&Value) -> Value,
{
    let key = key.into();
    move |input| over(input, &key, &f)
}
