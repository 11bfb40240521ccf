//! Snippet builder
//!
//! Turns a snippet definition plus supplied variables into the request body
//! sent to the API. The template is treated as lines of text: lines naming
//! an unset optional parameter are dropped, the first line is rewritten to
//! declare the remaining variables, and double quotes are stripped so that
//! `"$name"` placeholders become variable references.

use super::snippet::SnippetDefinition;
use crate::error::PlatformError;
use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};

/// Wire-ready GraphQL request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestObject {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl RequestObject {
    /// A query sent verbatim, without variables
    #[must_use]
    pub fn verbatim(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut body = Map::new();
        body.insert("query".to_owned(), Value::String(self.query.clone()));
        if let Some(variables) = &self.variables {
            body.insert("variables".to_owned(), Value::Object(variables.clone()));
        }
        Value::Object(body)
    }
}

/// Null and empty lists count as "not supplied"
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Infer the GraphQL type of a runtime value
///
/// # Errors
///
/// Returns a build error for empty lists, floats and objects
pub fn gql_type(value: &Value) -> Result<String, PlatformError> {
    match value {
        Value::String(_) => Ok("String!".to_owned()),
        Value::Bool(_) => Ok("Boolean!".to_owned()),
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok("Int!".to_owned()),
        Value::Array(items) => {
            let first = items.first().ok_or_else(|| {
                PlatformError::build("cannot infer the element type of an empty list")
            })?;
            Ok(format!("[{}]", gql_type(first)?))
        }
        other => Err(PlatformError::build(format!("unsupported value type: {other}"))),
    }
}

/// Build the request for `definition` from the supplied variables
///
/// Transformers run first, so emptiness is judged on transformed values.
/// Optional parameters that are absent, null or an empty list have every
/// template line mentioning them removed. The `variables` key is present
/// only when at least one value survives filtering.
///
/// # Errors
///
/// Returns a build error if a transformer rejects a value, a type cannot be
/// inferred, or the template has no leading `query`/`mutation` line
pub fn build(definition: &SnippetDefinition, variables: &Map<String, Value>) -> Result<RequestObject> {
    let variables = definition
        .transform_variables(variables.clone())
        .map_err(|e| PlatformError::build(format!("{e:#}")))?;

    let mut lines: Vec<&str> = definition
        .template
        .split('\n')
        .filter(|line| !line.is_empty())
        .collect();

    for (name, _) in definition.optional {
        if variables.get(*name).is_none_or(is_unset) {
            let placeholder = format!("${}", name.replace('-', "_"));
            lines.retain(|line| !line.contains(&placeholder));
        }
    }

    let variables_out: Map<String, Value> = variables
        .into_iter()
        .filter(|(_, value)| !is_unset(value))
        .collect();

    let mut header = None;
    if !variables_out.is_empty() {
        let first = lines
            .first()
            .ok_or_else(|| PlatformError::build(format!("{}: empty template", definition.name)))?;
        let (keyword, _) = first.trim().split_once(' ').ok_or_else(|| {
            PlatformError::build(format!(
                "{}: cannot find the operation keyword in '{}'",
                definition.name,
                first.trim()
            ))
        })?;

        let declarations = variables_out
            .iter()
            .map(|(name, value)| {
                let gql = match definition.parameter_type(name) {
                    Some(declared) => declared.to_owned(),
                    None => gql_type(value)?,
                };
                Ok(format!("${name}: {gql}"))
            })
            .collect::<Result<Vec<_>, PlatformError>>()?;

        header = Some(format!("{keyword} ({}) {{", declarations.join(", ")));
    }

    let mut query_lines: Vec<&str> = lines;
    if let Some(header) = header.as_deref() {
        query_lines[0] = header;
    }
    let query = query_lines.join("\n").replace('"', "");

    Ok(RequestObject {
        query,
        variables: (!variables_out.is_empty()).then_some(variables_out),
    })
}

/// Build the request for a query that is sent verbatim
///
/// # Errors
///
/// Returns a build error if any variables are supplied
pub fn build_adhoc(query: &str, variables: &Map<String, Value>) -> Result<RequestObject> {
    if !variables.is_empty() {
        return Err(PlatformError::build("ad-hoc queries do not support variables").into());
    }
    Ok(RequestObject::verbatim(query))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::graphql::snippet::{help, string_to_bool};
    use serde_json::json;

    fn vars(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    const ADD_REPO: SnippetDefinition = SnippetDefinition::new(
        "add-repo",
        r#"mutation {
  addRepository(input: { url: "$url" name: "$name" }) { repository { url name } }
}"#,
    )
    .required(&[("url", help("url")), ("name", help("name"))]);

    const WITH_OPTIONAL: SnippetDefinition = SnippetDefinition::new(
        "with-optional",
        r#"
    query {
      thing(
        key: "$key"
        description: "$description"
        active: $active
      ) { id }
    }
"#,
    )
    .required(&[("key", help("key"))])
    .optional(&[("description", help("description")), ("active", help("active"))])
    .transformers(&[("active", string_to_bool)]);

    #[test]
    fn end_to_end_example() {
        let request = build(&ADD_REPO, &vars(json!({"url": "http://x", "name": "demo"}))).unwrap();
        assert_eq!(
            request.query,
            "mutation ($url: String!, $name: String!) {\n  addRepository(input: { url: $url name: $name }) { repository { url name } }\n}"
        );
        assert_eq!(
            request.to_value(),
            json!({
                "query": request.query,
                "variables": {"url": "http://x", "name": "demo"},
            })
        );
    }

    #[test]
    fn build_is_idempotent() {
        let variables = vars(json!({"key": "k", "description": "d"}));
        let first = build(&WITH_OPTIONAL, &variables).unwrap();
        let second = build(&WITH_OPTIONAL, &variables).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn optional_lines_elided_when_absent_or_null() {
        for variables in [json!({"key": "k"}), json!({"key": "k", "description": null})] {
            let request = build(&WITH_OPTIONAL, &vars(variables)).unwrap();
            assert!(!request.query.contains("$description"));
            assert!(!request.query.contains("$active"));
            assert!(request.query.contains("key: $key"));
            assert_eq!(request.variables, Some(vars(json!({"key": "k"}))));
        }
    }

    #[test]
    fn optional_lines_kept_when_set() {
        let request = build(&WITH_OPTIONAL, &vars(json!({"key": "k", "description": "d"}))).unwrap();
        assert!(request.query.contains("description: $description"));
        assert!(request.query.starts_with("query ($key: String!, $description: String!) {"));
        assert_eq!(request.variables.unwrap()["description"], json!("d"));
    }

    #[test]
    fn transformer_runs_before_filtering() {
        let request = build(&WITH_OPTIONAL, &vars(json!({"key": "k", "active": "false"}))).unwrap();
        assert!(request.query.contains("active: $active"));
        assert!(request.query.contains("$active: Boolean!"));
        assert_eq!(request.variables.unwrap()["active"], json!(false));
    }

    #[test]
    fn empty_list_counts_as_unset() {
        let request = build(&WITH_OPTIONAL, &vars(json!({"key": "k", "description": []}))).unwrap();
        assert!(!request.query.contains("$description"));
        assert!(!request.variables.unwrap().contains_key("description"));
    }

    #[test]
    fn no_variables_key_without_values() {
        const PLAIN: SnippetDefinition =
            SnippetDefinition::new("plain", "query {\n  \"thing\" { id }\n}");
        let request = build(&PLAIN, &Map::new()).unwrap();
        assert_eq!(request.query, "query {\n  thing { id }\n}");
        assert!(request.variables.is_none());
        assert!(request.to_value().get("variables").is_none());
    }

    #[test]
    fn type_inference() {
        assert_eq!(gql_type(&json!("abc")).unwrap(), "String!");
        assert_eq!(gql_type(&json!(true)).unwrap(), "Boolean!");
        assert_eq!(gql_type(&json!(false)).unwrap(), "Boolean!");
        assert_eq!(gql_type(&json!(5)).unwrap(), "Int!");
        assert_eq!(gql_type(&json!(["a", "b"])).unwrap(), "[String!]");
        assert!(matches!(gql_type(&json!([])), Err(PlatformError::Build { .. })));
        assert!(gql_type(&json!(1.5)).is_err());
        assert!(gql_type(&json!({"a": 1})).is_err());
    }

    #[test]
    fn explicit_type_wins() {
        const SHOW: SnippetDefinition =
            SnippetDefinition::new("show", "query {\n  account(provider: $provider) { id }\n}")
                .required(&[("provider", help("provider"))])
                .parameter_types(&[("provider", "CloudProvider!")]);

        let request = build(&SHOW, &vars(json!({"provider": "AWS"}))).unwrap();
        assert!(request.query.starts_with("query ($provider: CloudProvider!) {"));
    }

    #[test]
    fn uninferable_value_is_a_build_error() {
        let err = build(&ADD_REPO, &vars(json!({"url": [], "name": 1.5}))).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PlatformError>(),
            Some(PlatformError::Build { .. })
        ));
    }

    #[test]
    fn adhoc_is_verbatim() {
        let request = build_adhoc("query { \"x\" }", &Map::new()).unwrap();
        assert_eq!(request.query, "query { \"x\" }");
        assert!(build_adhoc("query { x }", &vars(json!({"a": 1}))).is_err());
    }
}
