//! Snippet registry
//!
//! An immutable name to definition lookup built once from an explicit list.

use super::snippet::SnippetDefinition;
use crate::error::PlatformError;
use anyhow::Result;
use std::collections::BTreeMap;
use tracing::warn;

/// Immutable lookup of snippet definitions by name
#[derive(Debug, Clone, Default)]
pub struct SnippetRegistry {
    snippets: BTreeMap<&'static str, &'static SnippetDefinition>,
}

impl SnippetRegistry {
    /// Build a registry from the given definitions
    ///
    /// Template lint findings are logged as warnings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if two definitions share a name
    pub fn new(definitions: &[&'static SnippetDefinition]) -> Result<Self> {
        let mut snippets = BTreeMap::new();
        for definition in definitions {
            if snippets.insert(definition.name, *definition).is_some() {
                return Err(PlatformError::configuration(format!(
                    "Snippet '{}' is registered twice",
                    definition.name
                ))
                .into());
            }
            for finding in definition.lint_template()? {
                warn!("{finding}");
            }
        }
        Ok(Self { snippets })
    }

    /// Look up a snippet by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static SnippetDefinition> {
        self.snippets.get(name).copied()
    }

    /// Look up a snippet by name, failing for unknown names
    ///
    /// # Errors
    ///
    /// Returns an unknown snippet error if `name` is not registered
    pub fn resolve(&self, name: &str) -> Result<&'static SnippetDefinition, PlatformError> {
        self.get(name)
            .ok_or_else(|| PlatformError::unknown_snippet(name))
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.snippets.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static SnippetDefinition> + '_ {
        self.snippets.values().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}
