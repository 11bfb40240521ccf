//! Output formatting
//!
//! Renders decoded responses as `plain` (Python `str()` style), indented
//! `json`, or `yaml` with sorted keys.

use anyhow::{Context as _, Result};
use clap::ValueEnum;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Python-style representation
    Plain,
    /// Indented JSON
    Json,
    /// YAML with sorted keys
    #[default]
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(format!("Invalid format: {s}. Use 'plain', 'json' or 'yaml'")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "plain",
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

impl OutputFormat {
    /// Render a value
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn format(self, value: &Value) -> Result<String> {
        match self {
            Self::Plain => Ok(plain(value)),
            Self::Json => serde_json::to_string_pretty(value).context("Failed to render JSON"),
            Self::Yaml => {
                let rendered =
                    serde_yaml::to_string(&sort_keys(value)).context("Failed to render YAML")?;
                Ok(rendered.trim_end_matches('\n').to_owned())
            }
        }
    }
}

/// Python `str()` of a value: strings bare at top level, `repr` inside containers
#[must_use]
pub fn plain(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => repr(other),
    }
}

/// Python `repr()` of a value
#[must_use]
pub fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_owned(),
        Value::Bool(true) => "True".to_owned(),
        Value::Bool(false) => "False".to_owned(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => repr_str(text),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", repr_str(k), repr(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

fn repr_str(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Copy of `value` with object keys sorted at every level
#[must_use]
pub fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let sorted: Map<String, Value> = keys
                .into_iter()
                .filter_map(|k| map.get(k).map(|v| (k.clone(), sort_keys(v))))
                .collect();
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_matches_python_str() {
        assert_eq!(plain(&json!({"foo": "bar"})), "{'foo': 'bar'}");
        assert_eq!(
            plain(&json!({"a": [1, true, null], "b": {"c": false}})),
            "{'a': [1, True, None], 'b': {'c': False}}"
        );
        assert_eq!(plain(&json!("top level")), "top level");
        assert_eq!(plain(&json!(["it's"])), "[\"it's\"]");
        assert_eq!(plain(&json!(["a\nb"])), "['a\\nb']");
    }

    #[test]
    fn json_is_indented() {
        assert_eq!(
            OutputFormat::Json.format(&json!({"foo": "bar"})).unwrap(),
            "{\n  \"foo\": \"bar\"\n}"
        );
    }

    #[test]
    fn yaml_sorts_keys() {
        let rendered = OutputFormat::Yaml
            .format(&json!({"b": 1, "a": {"d": 2, "c": 3}}))
            .unwrap();
        assert_eq!(rendered, "a:\n  c: 3\n  d: 2\nb: 1");
    }

    #[test]
    fn parse_formats() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::Plain.to_string(), "plain");
    }
}
