//! `${path}` interpolation against a JSON value

use crate::path;
use flowchain_core::{Error, Result};
use serde_json::Value;

/// Replace every `${path}` placeholder in `template` with the value at `path`
///
/// Strings are inserted without quotes; any other value is inserted as its
/// JSON text. An unresolved path or an unterminated placeholder is an error.
pub fn render(template: &str, data: &Value) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .ok_or_else(|| Error::template(after, "placeholder is not terminated"))?;
        let placeholder = after[..end].trim();

        match path::get(data, placeholder) {
            Some(Value::String(s)) => output.push_str(s),
            Some(other) => output.push_str(&other.to_string()),
            None => return Err(Error::template(placeholder, "path not found")),
        }

        rest = &after[end + 1..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Curried form of [`render`] for use as a pipeline transform
pub fn template(template: impl Into<String>) -> impl Fn(&Value) -> Result<String> {
    let template = template.into();
    move |data| render(&template, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple_placeholder() {
        assert_eq!(render("${foo}", &json!({"foo": "bar"})).unwrap(), "bar");
    }

    #[test]
    fn test_render_nested_and_non_string_values() {
        let data = json!({"user": {"name": "John", "age": 42, "tags": ["a"]}});
        let rendered = render("${user.name} (${ user.age }) ${user.tags}", &data).unwrap();

        assert_eq!(rendered, r#"John (42) ["a"]"#);
    }

    #[test]
    fn test_render_without_placeholders() {
        assert_eq!(render("plain text $ {}", &json!({})).unwrap(), "plain text $ {}");
    }

    #[test]
    fn test_render_missing_path() {
        let err = render("hi ${user.email}", &json!({"user": {}})).unwrap_err();
        assert_eq!(
            err,
            Error::template("user.email", "path not found"),
        );
    }

    #[test]
    fn test_render_unterminated_placeholder() {
        assert!(render("hi ${user", &json!({"user": 1})).is_err());
    }

    #[test]
    fn test_template_is_reusable() {
        let greet = template("hello ${name}");

        assert_eq!(greet(&json!({"name": "a"})).unwrap(), "hello a");
        assert_eq!(greet(&json!({"name": "b"})).unwrap(), "hello b");
    }
}
