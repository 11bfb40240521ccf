//! Cursor pagination over a single snippet

use super::defaults;
use super::expr::PathExpr;
use crate::error::PlatformError;
use crate::graphql::{GraphQLExecutor, SnippetDefinition, SnippetRef};
use anyhow::Result;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Where to find page info and results in each response
#[derive(Debug, Clone, Default)]
pub struct PageExtract {
    pub page_info: Option<PathExpr>,
    pub result: Option<PathExpr>,
    /// Concatenate per-page result lists into one list
    pub flatten: bool,
}

/// Drives repeated executor calls until the server reports no further page
pub struct Pager<'e, 'a> {
    executor: &'e GraphQLExecutor<'a>,
}

impl<'e, 'a> Pager<'e, 'a> {
    #[must_use]
    pub const fn new(executor: &'e GraphQLExecutor<'a>) -> Self {
        Self { executor }
    }

    /// Run `snippet`, following `pageInfo.endCursor` while `hasNextPage` holds
    ///
    /// Without extractable page info the single (possibly extracted) result
    /// is returned. Otherwise the per-page results are returned as a list,
    /// or concatenated when flattening.
    ///
    /// `variables` are laid over the snippet's defaults, so paginated
    /// snippets always send `first`, `last`, `before` and `after`.
    ///
    /// # Errors
    ///
    /// Aborts on the first page that fails, carries an `errors` array, or
    /// reports an expired token
    pub fn paginate(
        &self,
        snippet: &SnippetDefinition,
        variables: Map<String, Value>,
        extract: &PageExtract,
    ) -> Result<Value> {
        let mut variables = {
            let mut merged = defaults(snippet);
            merged.extend(variables);
            merged
        };
        let (mut page_info, result) = self.run_page(snippet, &variables, extract)?;
        if page_info.is_none() {
            return Ok(result);
        }

        let mut pages = vec![result];
        while let Some(info) = page_info.take() {
            if info.get("hasNextPage").and_then(Value::as_bool) != Some(true) {
                break;
            }
            let Some(cursor) = info.get("endCursor").filter(|c| !c.is_null()) else {
                warn!(
                    "{}: hasNextPage set without endCursor, stopping after {} page(s)",
                    snippet.name,
                    pages.len()
                );
                break;
            };
            variables.insert("after".to_owned(), cursor.clone());
            debug!("{}: fetching page {}", snippet.name, pages.len() + 1);

            let (next_info, result) = self.run_page(snippet, &variables, extract)?;
            pages.push(result);
            page_info = next_info;
        }

        if extract.flatten {
            let mut flat = Vec::new();
            for page in pages {
                match page {
                    Value::Array(items) => flat.extend(items),
                    Value::Null => {}
                    other => flat.push(other),
                }
            }
            return Ok(Value::Array(flat));
        }
        Ok(Value::Array(pages))
    }

    fn run_page(
        &self,
        snippet: &SnippetDefinition,
        variables: &Map<String, Value>,
        extract: &PageExtract,
    ) -> Result<(Option<Value>, Value)> {
        let response = self.executor.run(SnippetRef::Definition(snippet), variables)?;
        check_errors(&response)?;

        let page_info = match &extract.page_info {
            Some(expr) => Some(expr.search(&response)?).filter(|info| !info.is_null()),
            None => None,
        };
        let result = match &extract.result {
            Some(expr) => expr.search(&response)?,
            None => response,
        };
        Ok((page_info, result))
    }
}

/// Fail with an API error when a response carries a non-empty `errors` value
///
/// # Errors
///
/// Returns [`PlatformError::Api`] holding the `errors` payload
pub fn check_errors(response: &Value) -> Result<(), PlatformError> {
    match response.get("errors") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(errors)) if errors.is_empty() => Ok(()),
        Some(errors) => Err(PlatformError::Api {
            errors: errors.clone(),
        }),
    }
}
