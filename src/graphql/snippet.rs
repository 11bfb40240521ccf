//! Snippet definitions
//!
//! A snippet is a GraphQL query or mutation template with `$name`
//! placeholders plus the schema of parameters it accepts. Definitions are
//! built in `const` context and never change after construction.

use anyhow::{Context as _, Result, anyhow};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)"));

/// Pure function applied to a supplied value before the request is built
pub type Transformer = fn(Value) -> Result<Value>;

/// Value type accepted on the command line for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Int,
    Bool,
}

/// Help text and command line attributes of one declared parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub help: &'static str,
    pub multiple: bool,
    pub kind: ParamKind,
    pub default: Option<&'static str>,
    pub choices: &'static [&'static str],
}

/// Shorthand for a string parameter described by `help`
#[must_use]
pub const fn help(help: &'static str) -> ParamSpec {
    ParamSpec {
        help,
        multiple: false,
        kind: ParamKind::String,
        default: None,
        choices: &[],
    }
}

impl ParamSpec {
    /// Accept the option several times, collecting a list
    #[must_use]
    pub const fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn default_value(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Restrict the accepted values
    #[must_use]
    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    /// Default value converted to the parameter's kind
    #[must_use]
    pub fn default_json(&self) -> Option<Value> {
        let default = self.default?;
        let typed = match self.kind {
            ParamKind::Int => default.parse::<i64>().ok().map(Value::from),
            ParamKind::Bool => default.parse::<bool>().ok().map(Value::Bool),
            ParamKind::String => None,
        };
        Some(typed.unwrap_or_else(|| Value::String(default.to_owned())))
    }
}

/// A named, reusable GraphQL template with its parameter schema
#[derive(Debug)]
pub struct SnippetDefinition {
    pub name: &'static str,
    pub template: &'static str,
    pub required: &'static [(&'static str, ParamSpec)],
    pub optional: &'static [(&'static str, ParamSpec)],
    pub parameter_types: &'static [(&'static str, &'static str)],
    pub variable_transformers: &'static [(&'static str, Transformer)],
    pub pagination: bool,
    pub result_expr: Option<&'static str>,
    pub pagination_expr: Option<&'static str>,
}

impl SnippetDefinition {
    /// A snippet with no parameters
    #[must_use]
    pub const fn new(name: &'static str, template: &'static str) -> Self {
        Self {
            name,
            template,
            required: &[],
            optional: &[],
            parameter_types: &[],
            variable_transformers: &[],
            pagination: false,
            result_expr: None,
            pagination_expr: None,
        }
    }

    #[must_use]
    pub const fn required(mut self, required: &'static [(&'static str, ParamSpec)]) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub const fn optional(mut self, optional: &'static [(&'static str, ParamSpec)]) -> Self {
        self.optional = optional;
        self
    }

    /// Declare explicit GraphQL types, overriding inference
    #[must_use]
    pub const fn parameter_types(mut self, types: &'static [(&'static str, &'static str)]) -> Self {
        self.parameter_types = types;
        self
    }

    #[must_use]
    pub const fn transformers(mut self, transformers: &'static [(&'static str, Transformer)]) -> Self {
        self.variable_transformers = transformers;
        self
    }

    /// Mark the snippet as cursor paginated
    #[must_use]
    pub const fn paginated(mut self) -> Self {
        self.pagination = true;
        self
    }

    /// Path to the meaningful result in a response
    #[must_use]
    pub const fn result_expr(mut self, expr: &'static str) -> Self {
        self.result_expr = Some(expr);
        self
    }

    /// Path to the `pageInfo` object in a response
    #[must_use]
    pub const fn pagination_expr(mut self, expr: &'static str) -> Self {
        self.pagination_expr = Some(expr);
        self
    }

    /// Explicit GraphQL type declared for `name`
    #[must_use]
    pub fn parameter_type(&self, name: &str) -> Option<&'static str> {
        lookup(self.parameter_types, name).copied()
    }

    #[must_use]
    pub fn transformer(&self, name: &str) -> Option<Transformer> {
        lookup(self.variable_transformers, name).copied()
    }

    #[must_use]
    pub fn is_optional(&self, name: &str) -> bool {
        lookup(self.optional, name).is_some()
    }

    /// Apply the declared transformers to every supplied value that has one
    ///
    /// # Errors
    ///
    /// Returns the first transformer failure, annotated with the parameter name
    pub fn transform_variables(
        &self,
        variables: serde_json::Map<String, Value>,
    ) -> Result<serde_json::Map<String, Value>> {
        variables
            .into_iter()
            .map(|(name, value)| match self.transformer(&name) {
                Some(transform) => {
                    let value = transform(value)
                        .with_context(|| format!("Invalid value for '{name}'"))?;
                    Ok((name, value))
                }
                None => Ok((name, value)),
            })
            .collect()
    }

    /// Template lines that mix an optional placeholder with other placeholders
    ///
    /// Eliding such a line when the optional value is missing also drops the
    /// other placeholders on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the placeholder pattern fails to compile
    pub fn lint_template(&self) -> Result<Vec<String>> {
        let placeholder = PLACEHOLDER
            .as_ref()
            .map_err(|err| anyhow!("Invalid placeholder pattern: {err}"))?;

        let mut findings = Vec::new();
        for line in self.template.lines() {
            let names: Vec<&str> = placeholder
                .captures_iter(line)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                .collect();
            if names.len() < 2 {
                continue;
            }
            if let Some(optional) = names
                .iter()
                .find(|name| self.optional.iter().any(|(k, _)| k.replace('-', "_") == **name))
            {
                findings.push(format!(
                    "{}: optional '${optional}' shares a line with other placeholders: {}",
                    self.name,
                    line.trim()
                ));
            }
        }
        Ok(findings)
    }
}

fn lookup<'a, T>(entries: &'a [(&'static str, T)], name: &str) -> Option<&'a T> {
    entries.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
}

/// Parse a JSON document supplied as a string; absent becomes an empty list
///
/// # Errors
///
/// Returns an error if the string is not valid JSON
pub fn json_list(value: Value) -> Result<Value> {
    match value {
        Value::Null => Ok(Value::Array(Vec::new())),
        Value::String(text) => {
            serde_json::from_str(&text).with_context(|| format!("Expected JSON, got: {text}"))
        }
        other => Ok(other),
    }
}

/// Coerce a string to a boolean: `true`, `t`, `yes` and `y` are true,
/// anything else is false
///
/// # Errors
///
/// Never fails; the signature matches [`Transformer`]
pub fn string_to_bool(value: Value) -> Result<Value> {
    match value {
        Value::String(text) => Ok(Value::Bool(matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "t" | "yes" | "y"
        ))),
        other => Ok(other),
    }
}

/// Parse an integer supplied as a string
///
/// # Errors
///
/// Returns an error if the string is not an integer
pub fn string_to_int(value: Value) -> Result<Value> {
    match value {
        Value::String(text) => {
            let number: i64 = text
                .trim()
                .parse()
                .with_context(|| format!("Expected an integer, got: {text}"))?;
            Ok(Value::from(number))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use serde_json::json;

    const LINTED: SnippetDefinition = SnippetDefinition::new(
        "linted",
        "query {\n  thing(a: $a, b: $b) { id }\n  other(c: $c) { id }\n}",
    )
    .required(&[("a", help("a"))])
    .optional(&[("b", help("b")), ("c", help("c"))]);

    #[test]
    fn lint_flags_shared_lines() {
        let findings = LINTED.lint_template().unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("$b"));
    }

    #[test]
    fn placeholder_pattern_is_shared() {
        assert!(PLACEHOLDER.is_ok());
        let first: *const Regex = PLACEHOLDER.as_ref().unwrap();
        assert_eq!(LINTED.lint_template().unwrap(), LINTED.lint_template().unwrap());
        let second: *const Regex = PLACEHOLDER.as_ref().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn lookups() {
        const DEF: SnippetDefinition = SnippetDefinition::new("x", "query { x }")
            .optional(&[("tags", help("tags").multiple())])
            .parameter_types(&[("provider", "CloudProvider!")])
            .transformers(&[("tags", json_list)]);

        assert_eq!(DEF.parameter_type("provider"), Some("CloudProvider!"));
        assert_eq!(DEF.parameter_type("other"), None);
        assert!(DEF.is_optional("tags"));
        assert!(DEF.transformer("tags").is_some());
        assert!(DEF.optional[0].1.multiple);
        assert_eq!(DEF.optional[0].1.default_json(), None);
        assert_eq!(
            help("n").kind(ParamKind::Int).default_value("20").default_json(),
            Some(json!(20))
        );
        assert_eq!(help("s").default_value("").default_json(), Some(json!("")));
    }

    #[test]
    fn transformers() {
        assert_eq!(string_to_bool(json!("False")).unwrap(), json!(false));
        assert_eq!(string_to_bool(json!("true")).unwrap(), json!(true));
        assert_eq!(string_to_bool(json!("maybe")).unwrap(), json!(false));
        assert_eq!(string_to_bool(Value::Null).unwrap(), Value::Null);
        assert_eq!(string_to_int(json!("3")).unwrap(), json!(3));
        assert!(string_to_int(json!("three")).is_err());
        assert_eq!(json_list(Value::Null).unwrap(), json!([]));
        assert_eq!(
            json_list(json!(r#"[{"key": "a", "value": "b"}]"#)).unwrap(),
            json!([{"key": "a", "value": "b"}])
        );
        assert_eq!(string_to_int(Value::Null).unwrap(), Value::Null);
    }
}
