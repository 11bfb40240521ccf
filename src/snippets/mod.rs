//! Built-in snippet catalog

pub mod account;
pub mod account_group;
pub mod binding;
pub mod policy;
pub mod policy_collection;
pub mod repository;

use crate::graphql::{SnippetDefinition, SnippetRegistry};
use anyhow::Result;

/// Every built-in snippet
pub static ALL: [&SnippetDefinition; 35] = [
    // accounts
    &account::ADD_ACCOUNT,
    &account::LIST_ACCOUNTS,
    &account::REMOVE_ACCOUNT,
    &account::SHOW_ACCOUNT,
    &account::UPDATE_ACCOUNT,
    &account::VALIDATE_ACCOUNT,
    // account groups
    &account_group::ADD_ACCOUNT_GROUP,
    &account_group::ADD_ACCOUNT_GROUP_ITEM,
    &account_group::LIST_ACCOUNT_GROUPS,
    &account_group::REMOVE_ACCOUNT_GROUP,
    &account_group::REMOVE_ACCOUNT_GROUP_ITEM,
    &account_group::SHOW_ACCOUNT_GROUP,
    &account_group::UPDATE_ACCOUNT_GROUP,
    // bindings
    &binding::ADD_BINDING,
    &binding::DEPLOY_BINDING,
    &binding::LIST_BINDINGS,
    &binding::REMOVE_BINDING,
    &binding::RUN_BINDING,
    &binding::SHOW_BINDING,
    &binding::UPDATE_BINDING,
    // policy collections
    &policy_collection::ADD_POLICY_COLLECTION,
    &policy_collection::ADD_POLICY_COLLECTION_ITEM,
    &policy_collection::LIST_POLICY_COLLECTIONS,
    &policy_collection::REMOVE_POLICY_COLLECTION,
    &policy_collection::REMOVE_POLICY_COLLECTION_ITEM,
    &policy_collection::SHOW_POLICY_COLLECTION,
    &policy_collection::UPDATE_POLICY_COLLECTION,
    // policies
    &policy::LIST_POLICIES,
    &policy::SHOW_POLICY,
    // repositories
    &repository::ADD_REPOSITORY,
    &repository::LIST_REPOSITORY,
    &repository::PROCESS_REPOSITORY,
    &repository::REMOVE_REPOSITORY,
    &repository::SCAN_REPOSITORY,
    &repository::SHOW_REPOSITORY,
];

/// Registry holding the built-in catalog
///
/// # Errors
///
/// Returns an error if two built-in snippets share a name
pub fn registry() -> Result<SnippetRegistry> {
    SnippetRegistry::new(&ALL)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::graphql::options::PAGINATION_OPTIONS;

    #[test]
    fn catalog_registers_every_snippet() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 35);
        assert_eq!(registry.len(), ALL.len());
        for definition in ALL {
            assert!(std::ptr::eq(registry.get(definition.name).unwrap(), definition));
        }
    }

    #[test]
    fn declared_parameters_appear_in_templates() {
        for definition in ALL {
            let declared = definition.required.iter().chain(definition.optional);
            for (name, _) in declared {
                assert!(
                    definition.template.contains(&format!("${name}")),
                    "{}: ${name} missing from template",
                    definition.name
                );
            }
            if definition.pagination {
                for (name, _) in &PAGINATION_OPTIONS {
                    assert!(definition.template.contains(&format!("${name}")));
                }
            }
        }
    }

    #[test]
    fn templates_pass_lint() {
        for definition in ALL {
            assert!(definition.lint_template().unwrap().is_empty(), "{}", definition.name);
        }
    }

    #[test]
    fn templates_start_with_an_operation() {
        for definition in ALL {
            let first = definition.template.trim_start().lines().next().unwrap();
            assert!(
                first.starts_with("query ") || first.starts_with("mutation "),
                "{}",
                definition.name
            );
        }
    }
}
