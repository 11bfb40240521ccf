//! JMESPath expressions over JSON responses
//!
//! Snippets name their result list and `pageInfo` object with expressions
//! such as `data.accounts.edges[].node`. Paths that lead nowhere yield null.

use crate::error::PlatformError;
use anyhow::Result;
use jmespath::Expression;
use serde_json::Value;
use std::fmt;

/// A compiled path expression
#[derive(Clone)]
pub struct PathExpr {
    compiled: Expression<'static>,
}

impl PathExpr {
    /// Compile an expression
    ///
    /// # Errors
    ///
    /// Returns a build error if the expression is not valid JMESPath
    pub fn parse(expr: &str) -> Result<Self> {
        let compiled = jmespath::compile(expr)
            .map_err(|err| PlatformError::build(format!("invalid expression '{expr}': {err}")))?;
        Ok(Self { compiled })
    }

    /// The expression as written
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.compiled.as_str()
    }

    /// Evaluate against `value`
    ///
    /// # Errors
    ///
    /// Returns a build error if evaluation fails, e.g. a function applied to
    /// an argument of the wrong type
    pub fn search(&self, value: &Value) -> Result<Value> {
        let found = self
            .compiled
            .search(value)
            .map_err(|err| PlatformError::build(format!("'{}': {err}", self.as_str())))?;
        Ok(serde_json::to_value(&*found)?)
    }
}

impl fmt::Debug for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathExpr").field(&self.as_str()).finish()
    }
}

/// Compile and evaluate in one step
///
/// # Errors
///
/// Returns an error if the expression does not compile or evaluate
pub fn search(expr: &str, value: &Value) -> Result<Value> {
    PathExpr::parse(expr)?.search(value)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use serde_json::json;

    fn page() -> Value {
        json!({
            "data": {
                "accounts": {
                    "edges": [
                        {"node": {"key": "a"}},
                        {"node": {"key": "b"}},
                        {"cursor": "x"},
                    ],
                    "pageInfo": {"hasNextPage": false, "endCursor": "c1"},
                }
            }
        })
    }

    #[test]
    fn nested_fields() {
        assert_eq!(
            search("data.accounts.pageInfo", &page()).unwrap(),
            json!({"hasNextPage": false, "endCursor": "c1"})
        );
        assert_eq!(search("data.missing.pageInfo", &page()).unwrap(), Value::Null);
    }

    #[test]
    fn projection_drops_nulls() {
        assert_eq!(
            search("data.accounts.edges[].node", &page()).unwrap(),
            json!([{"key": "a"}, {"key": "b"}])
        );
        assert_eq!(
            search("data.accounts.edges[].node.key", &page()).unwrap(),
            json!(["a", "b"])
        );
    }

    #[test]
    fn indexing() {
        assert_eq!(
            search("data.accounts.edges[0].node.key", &page()).unwrap(),
            json!("a")
        );
        assert_eq!(
            search("data.accounts.edges[-1].cursor", &page()).unwrap(),
            json!("x")
        );
        assert_eq!(search("data.accounts.edges[7]", &page()).unwrap(), Value::Null);
    }

    #[test]
    fn flatten_nested_lists() {
        assert_eq!(search("[]", &json!([[1, 2], 3])).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn invalid_expressions() {
        let err = PathExpr::parse("a..b").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PlatformError>(),
            Some(PlatformError::Build { .. })
        ));
        assert!(PathExpr::parse("a[0").is_err());
    }

    #[test]
    fn keeps_source_text() {
        let expr = PathExpr::parse("data.policy.sourceYAML").unwrap();
        assert_eq!(expr.as_str(), "data.policy.sourceYAML");
        assert_eq!(format!("{expr:?}"), "PathExpr(\"data.policy.sourceYAML\")");
    }
}
