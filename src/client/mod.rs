//! Library client for the platform API
//!
//! Every registered snippet is callable by its method name, the snippet
//! name with dashes replaced by underscores (`list-accounts` becomes
//! `list_accounts`).
//!
//! # Example
//! ```no_run
//! use stacklet_admin::client::PlatformClient;
//! use stacklet_admin::graphql::{GraphQLExecutor, transport::ReqwestTransport};
//! use stacklet_admin::snippets;
//! use serde_json::Map;
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = snippets::registry()?;
//! let transport = ReqwestTransport::new()?;
//! let executor = GraphQLExecutor::new(
//!     "https://api.example.stacklet.io",
//!     Some("token".to_owned()),
//!     &transport,
//!     &registry,
//! )?;
//! let client = PlatformClient::new(executor).with_pager(true).with_expr(true);
//! let accounts = client.call("list_accounts", Map::new())?;
//! # Ok(())
//! # }
//! ```

pub mod expr;
pub mod pager;

pub use expr::PathExpr;
pub use pager::{PageExtract, Pager, check_errors};

use crate::graphql::options::PAGINATION_OPTIONS;
use crate::graphql::{GraphQLExecutor, SnippetDefinition};
use anyhow::Result;
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// Method name for a snippet name
#[must_use]
pub fn method_name(snippet_name: &str) -> String {
    snippet_name.replace('-', "_")
}

/// Calls snippets by method name
pub struct PlatformClient<'a> {
    executor: GraphQLExecutor<'a>,
    pager: bool,
    expr: bool,
}

impl<'a> PlatformClient<'a> {
    #[must_use]
    pub const fn new(executor: GraphQLExecutor<'a>) -> Self {
        Self {
            executor,
            pager: false,
            expr: false,
        }
    }

    /// Fetch every page of paginated snippets
    #[must_use]
    pub const fn with_pager(mut self, pager: bool) -> Self {
        self.pager = pager;
        self
    }

    /// Reduce responses to the snippet's result expression
    #[must_use]
    pub const fn with_expr(mut self, expr: bool) -> Self {
        self.expr = expr;
        self
    }

    #[must_use]
    pub fn executor(&self) -> &GraphQLExecutor<'a> {
        &self.executor
    }

    /// Available method names, sorted
    #[must_use]
    pub fn methods(&self) -> Vec<String> {
        self.executor.registry().names().map(method_name).collect()
    }

    fn definition(&self, method: &str) -> Result<&'static SnippetDefinition> {
        Ok(self.executor.registry().resolve(&method.replace('_', "-"))?)
    }

    /// Call a method
    ///
    /// Paginated snippets get the pagination defaults and every optional
    /// parameter defaults to null; `params` override both.
    ///
    /// # Errors
    ///
    /// Returns an unknown snippet error for unknown methods, an API error
    /// when the response carries `errors`, and any executor failure
    pub fn call(&self, method: &str, params: Map<String, Value>) -> Result<Value> {
        let definition = self.definition(method)?;
        let extract = PageExtract {
            page_info: self
                .pager
                .then_some(definition.pagination_expr)
                .flatten()
                .map(PathExpr::parse)
                .transpose()?,
            result: self
                .expr
                .then_some(definition.result_expr)
                .flatten()
                .map(PathExpr::parse)
                .transpose()?,
            flatten: self.expr && definition.result_expr.is_some(),
        };

        Pager::new(&self.executor).paginate(definition, params, &extract)
    }

    /// Parameter documentation for a method
    ///
    /// # Errors
    ///
    /// Returns an unknown snippet error for unknown methods
    pub fn describe(&self, method: &str) -> Result<String> {
        Ok(describe(self.definition(method)?))
    }
}

/// Default variables for a snippet call
#[must_use]
pub fn defaults(definition: &SnippetDefinition) -> Map<String, Value> {
    let mut defaults = Map::new();
    if definition.pagination {
        for (name, spec) in &PAGINATION_OPTIONS {
            defaults.insert((*name).to_owned(), spec.default_json().unwrap_or(Value::Null));
        }
    }
    for (name, _) in definition.optional {
        defaults.insert((*name).to_owned(), Value::Null);
    }
    defaults
}

/// Render the parameter documentation of a snippet
#[must_use]
pub fn describe(definition: &SnippetDefinition) -> String {
    let mut lines = Vec::new();
    if !definition.required.is_empty() {
        lines.push("Required parameters: ".to_owned());
        for (name, spec) in definition.required {
            lines.push(format!(" {name}: {}", spec.help));
        }
        lines.push(String::new());
    }
    if !definition.optional.is_empty() {
        lines.push("Optional parameters: ".to_owned());
        for (name, spec) in definition.optional {
            lines.push(format!(" {name}: {}", spec.help));
        }
        lines.push(String::new());
    }
    if definition.pagination {
        lines.push("pagination: ".to_owned());
        for (name, spec) in &PAGINATION_OPTIONS {
            let mut line = format!(" - {name}: {}", spec.help);
            if let Some(default) = spec.default {
                let _ = write!(line, " (default: {default:?})");
            }
            lines.push(line);
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::error::PlatformError;
    use crate::graphql::transport::MockTransport;
    use crate::snippets;
    use crate::snippets::account::{LIST_ACCOUNTS, SHOW_ACCOUNT, UPDATE_ACCOUNT};
    use serde_json::json;

    fn page(keys: &[&str], has_next: bool, cursor: &str) -> Value {
        let edges: Vec<Value> = keys.iter().map(|k| json!({"node": {"key": k}})).collect();
        json!({
            "data": {
                "accounts": {
                    "edges": edges,
                    "pageInfo": {"hasNextPage": has_next, "endCursor": cursor},
                }
            }
        })
    }

    fn two_pages() -> MockTransport {
        MockTransport::new()
            .with_json(200, &page(&["a"], true, "c1"))
            .with_json(200, &page(&["b"], false, "c2"))
    }

    #[test]
    fn call_follows_pages_and_flattens_results() {
        let registry = snippets::registry().unwrap();
        let transport = two_pages();
        let executor =
            GraphQLExecutor::new("https://api", Some("t".to_owned()), &transport, &registry)
                .unwrap();
        let client = PlatformClient::new(executor).with_pager(true).with_expr(true);

        let accounts = client.call("list_accounts", Map::new()).unwrap();
        assert_eq!(accounts, json!([{"key": "a"}, {"key": "b"}]));

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].json().unwrap()["variables"],
            json!({"first": 20, "last": 0, "before": "", "after": ""})
        );
        assert_eq!(requests[1].json().unwrap()["variables"]["after"], json!("c1"));
    }

    #[test]
    fn call_without_expr_lists_raw_pages() {
        let registry = snippets::registry().unwrap();
        let transport = two_pages();
        let executor =
            GraphQLExecutor::new("https://api", Some("t".to_owned()), &transport, &registry)
                .unwrap();
        let client = PlatformClient::new(executor).with_pager(true);

        let pages = client.call("list_accounts", Map::new()).unwrap();
        assert_eq!(
            pages,
            json!([page(&["a"], true, "c1"), page(&["b"], false, "c2")])
        );
    }

    #[test]
    fn call_without_pager_returns_one_page() {
        let registry = snippets::registry().unwrap();
        let transport = two_pages();
        let executor =
            GraphQLExecutor::new("https://api", Some("t".to_owned()), &transport, &registry)
                .unwrap();
        let client = PlatformClient::new(executor);

        let mut params = Map::new();
        params.insert("first".to_owned(), json!(1));
        let response = client.call("list_accounts", params).unwrap();
        assert_eq!(response, page(&["a"], true, "c1"));
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(transport.remaining(), 1);
        assert_eq!(transport.requests()[0].json().unwrap()["variables"]["first"], json!(1));
    }

    #[test]
    fn call_unknown_method() {
        let registry = snippets::registry().unwrap();
        let transport = MockTransport::new();
        let executor =
            GraphQLExecutor::new("https://api", Some("t".to_owned()), &transport, &registry)
                .unwrap();
        let client = PlatformClient::new(executor);

        let err = client.call("nope", Map::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PlatformError>(),
            Some(PlatformError::UnknownSnippet { name }) if name == "nope"
        ));
        assert!(transport.requests().is_empty());
        assert!(client.methods().contains(&"list_accounts".to_owned()));
    }

    #[test]
    fn method_names() {
        assert_eq!(method_name("list-account-groups"), "list_account_groups");
    }

    #[test]
    fn defaults_cover_pagination_and_optional() {
        assert_eq!(
            Value::Object(defaults(&LIST_ACCOUNTS)),
            json!({"first": 20, "last": 0, "before": "", "after": ""})
        );
        let update = defaults(&UPDATE_ACCOUNT);
        assert_eq!(update["tags"], Value::Null);
        assert!(!update.contains_key("provider"));
        assert!(defaults(&SHOW_ACCOUNT).is_empty());
    }

    #[test]
    fn describe_lists_parameters() {
        let doc = describe(&SHOW_ACCOUNT);
        assert!(doc.starts_with("Required parameters: \n provider: Account Provider"));
        assert!(!doc.contains("pagination"));

        let doc = describe(&LIST_ACCOUNTS);
        assert!(doc.contains(" - first: For use with pagination. Return the first n results. (default: \"20\")"));
    }
}
