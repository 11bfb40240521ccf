//! Policy collection snippets

use crate::graphql::snippet::{ParamSpec, SnippetDefinition, help, string_to_int};

const UUID: ParamSpec = help("Policy Collection UUID");
const PROVIDER: ParamSpec = help("Cloud Provider");
const DESCRIPTION: ParamSpec = help("Policy Collection Description");
const POLICY_UUID: ParamSpec = help("Policy UUID");
const POLICY_VERSION: ParamSpec = help("Policy Version");

pub static LIST_POLICY_COLLECTIONS: SnippetDefinition = SnippetDefinition::new(
    "list-policy-collections",
    r#"
    query {
      policyCollections(
        first: $first
        last: $last
        before: $before
        after: $after
      ) {
        edges {
          node {
            id
            uuid
            name
            description
            provider
            repository
            itemCount
          }
        }
        pageInfo {
          hasPreviousPage
          hasNextPage
          startCursor
          endCursor
          total
        }
      }
    }
"#,
)
.paginated()
.pagination_expr("data.policyCollections.pageInfo")
.result_expr("data.policyCollections.edges[].node");

pub static SHOW_POLICY_COLLECTION: SnippetDefinition = SnippetDefinition::new(
    "show-policy-collection",
    r#"
    query {
      policyCollection(
        uuid: $uuid
      ) {
        id
        uuid
        name
        description
        provider
        repository
        itemCount
        items {
          uuid
          name
          version
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)])
.result_expr("data.policyCollection");

pub static ADD_POLICY_COLLECTION: SnippetDefinition = SnippetDefinition::new(
    "add-policy-collection",
    r#"
    mutation {
      addPolicyCollection(input:{
        name: $name
        provider: $provider
        description: $description
      }){
        collection {
          id
          uuid
          name
          description
          provider
          repository
          itemCount
          items {
            uuid
            name
            version
          }
        }
      }
    }
"#,
)
.required(&[
    ("name", help("Policy Collection Name in Stacklet")),
    ("provider", PROVIDER),
])
.optional(&[("description", DESCRIPTION)])
.parameter_types(&[("provider", "CloudProvider!")])
.result_expr("data.addPolicyCollection.collection");

pub static UPDATE_POLICY_COLLECTION: SnippetDefinition = SnippetDefinition::new(
    "update-policy-collection",
    r#"
    mutation {
      updatePolicyCollection(input:{
        uuid: $uuid
        name: $name
        provider: $provider
        description: $description
      }){
        collection {
          id
          uuid
          name
          description
          provider
          repository
          itemCount
          items {
            uuid
            name
            version
          }
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)])
.optional(&[
    ("name", help("Policy Collection Name in Stacklet")),
    ("provider", PROVIDER),
    ("description", DESCRIPTION),
])
.parameter_types(&[("provider", "CloudProvider")]);

pub static ADD_POLICY_COLLECTION_ITEM: SnippetDefinition = SnippetDefinition::new(
    "add-policy-collection-item",
    r#"
    mutation {
      addPolicyCollectionItems(input:{
        uuid: $uuid
        items: [
          {
            policyUUID: $policy_uuid
            policyVersion: $policy_version
          }
        ]
      }) {
        collection {
          id
          uuid
          name
          description
          provider
          repository
          itemCount
          items {
            uuid
            name
            version
          }
        }
      }
    }
"#,
)
.required(&[("uuid", UUID), ("policy_uuid", POLICY_UUID)])
.optional(&[("policy_version", POLICY_VERSION)])
.transformers(&[("policy_version", string_to_int)]);

pub static REMOVE_POLICY_COLLECTION_ITEM: SnippetDefinition = SnippetDefinition::new(
    "remove-policy-collection-item",
    r#"
    mutation {
      removePolicyCollectionItems(input:{
        uuid: $uuid
        items: [
          {
            policyUUID: $policy_uuid
            policyVersion: $policy_version
          }
        ]
      }) {
        collection {
          id
          uuid
          name
          description
          provider
          repository
          itemCount
          items {
            uuid
            name
            version
          }
        }
      }
    }
"#,
)
.required(&[("uuid", UUID), ("policy_uuid", POLICY_UUID)])
.optional(&[("policy_version", POLICY_VERSION)])
.transformers(&[("policy_version", string_to_int)]);

pub static REMOVE_POLICY_COLLECTION: SnippetDefinition = SnippetDefinition::new(
    "remove-policy-collection",
    r#"
    mutation {
      removePolicyCollection(
        uuid: $uuid
      ){
        collection {
          id
          uuid
          name
          description
          provider
          repository
          itemCount
          items {
            uuid
            name
            version
          }
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)]);
