//! Value-forwarding helpers
//!
//! Every helper here runs some side effect and hands its input back unchanged,
//! so it can sit anywhere in a pipeline without breaking the value flow.

use crate::path;
use serde_json::Value;
use std::fmt::Display;

/// Run `effect` against the input, then forward the input
pub fn trigger<T, F>(effect: F) -> impl Fn(T) -> T
where
    F: Fn(&T),
{
    move |input| {
        effect(&input);
        input
    }
}

/// Run `effect` against the nested value at `key`, then forward the input
///
/// `effect` is skipped when `key` does not resolve, the same way
/// [`crate::lens::over`] leaves a missing path alone.
pub fn trigger_at<F>(key: impl Into<String>, effect: F) -> impl Fn(Value) -> Value
where
    F: Fn(&Value),
{
    let key = key.into();
    move |input| {
        if let Some(nested) = path::get(&input, &key) {
            effect(nested);
        }
        input
    }
}

/// Run `effect` only when `predicate` holds, then forward the input
pub fn when<T, P, F>(predicate: P, effect: F) -> impl Fn(T) -> T
where
    P: Fn(&T) -> bool,
    F: Fn(&T),
{
    move |input| {
        if predicate(&input) {
            effect(&input);
        }
        input
    }
}

/// Log a fixed message at info level, then forward the input
pub fn log<T>(message: impl Into<String>) -> impl Fn(T) -> T {
    let message = message.into();
    move |input| {
        tracing::info!("{message}");
        input
    }
}

/// Log the input at error level with an `error: ` prefix, then forward it
pub fn error<T: Display>() -> impl Fn(T) -> T {
    move |input| {
        tracing::error!("error: {input}");
        input
    }
}

/// Hand `prefix + input` to `sink`, then forward the input
pub fn prefix<T, F>(prefix: impl Into<String>, sink: F) -> impl Fn(T) -> T
where
    T: Display,
    F: Fn(String),
{
    let prefix = prefix.into();
    move |input| {
        sink(format!("{prefix}{input}"));
        input
    }
}

/// Hand `input + postfix` to `sink`, then forward the input
pub fn postfix<T, F>(postfix: impl Into<String>, sink: F) -> impl Fn(T) -> T
where
    T: Display,
    F: Fn(String),
{
    let postfix = postfix.into();
    move |input| {
        sink(format!("{input}{postfix}"));
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn test_trigger_forwards_input() {
        let seen = RefCell::new(Vec::new());
        let step = trigger(|v: &i32| seen.borrow_mut().push(*v));

        assert_eq!(step(4), 4);
        assert_eq!(step(5), 5);
        assert_eq!(*seen.borrow(), vec![4, 5]);
    }

    #[test]
    fn test_trigger_at_sees_nested_value_and_forwards_input() {
        let seen = RefCell::new(Vec::new());
        let step = trigger_at("user.name", |name| seen.borrow_mut().push(name.clone()));

        let input = json!({"user": {"name": "John"}});
        assert_eq!(step(input.clone()), input);
        assert_eq!(step(json!({"user": {}})), json!({"user": {}}));
        assert_eq!(*seen.borrow(), vec![json!("John")]);
    }

    #[test]
    fn test_when_runs_effect_conditionally() {
        let hits = RefCell::new(0);
        let step = when(|v: &i32| *v > 10, |_| *hits.borrow_mut() += 1);

        assert_eq!(step(3), 3);
        assert_eq!(step(30), 30);
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_prefix_and_postfix() {
        let out = RefCell::new(Vec::new());
        let pre = prefix("items: ", |s| out.borrow_mut().push(s));
        let post = postfix(" items", |s| out.borrow_mut().push(s));

        assert_eq!(pre(3), 3);
        assert_eq!(post(3), 3);
        assert_eq!(
            *out.borrow(),
            vec!["items: 3".to_string(), "3 items".to_string()]
        );
    }

    #[test]
    fn test_log_and_error_forward() {
        assert_eq!(log("working")("value"), "value");
        assert_eq!(error()("bad input"), "bad input");
    }
}
