//! Binding snippets

use crate::graphql::snippet::{ParamKind, ParamSpec, SnippetDefinition, help};

const UUID: ParamSpec = help("Binding UUID");
const NAME: ParamSpec = help("Binding Name");
const DESCRIPTION: ParamSpec = help("Binding Description");
const SCHEDULE: ParamSpec = help("Binding Schedule for Pull Mode Policies");
const VARIABLES: ParamSpec = help("Binding variables (JSON Encoded string)");

pub static LIST_BINDINGS: SnippetDefinition = SnippetDefinition::new(
    "list-bindings",
    r#"
    query {
      bindings(
        first: $first
        last: $last
        before: $before
        after: $after
      ) {
        edges {
          node {
            uuid
            name
            description
            schedule
            variables
            lastDeployed
            system
            accountGroup {
              uuid
              name
            }
            policyCollection {
              uuid
              name
            }
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
.result_expr("data.bindings.edges[].node");

pub static SHOW_BINDING: SnippetDefinition = SnippetDefinition::new(
    "show-binding",
    r#"
    query {
      binding(
        uuid: $uuid
      ) {
        uuid
        name
        description
        schedule
        variables
        lastDeployed
        system
        accountGroup {
          uuid
          name
        }
        policyCollection {
          uuid
          name
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)]);

pub static ADD_BINDING: SnippetDefinition = SnippetDefinition::new(
    "add-binding",
    r#"
    mutation {
      addBinding(input:{
        name: $name
        accountGroupUUID: $account_group_uuid
        policyCollectionUUID: $policy_collection_uuid
        description: $description
        schedule: $schedule
        variables: $variables
        deploy: $deploy
      }){
        binding {
          uuid
          name
          description
          schedule
          variables
          lastDeployed
          accountGroup {
            uuid
            name
          }
          policyCollection {
            uuid
            name
          }
        }
      }
    }
"#,
)
.required(&[
    ("name", NAME),
    ("account_group_uuid", help("Account Group UUID")),
    ("policy_collection_uuid", help("Policy Collection UUID")),
])
.optional(&[
    ("description", DESCRIPTION),
    ("schedule", SCHEDULE),
    ("variables", VARIABLES),
    (
        "deploy",
        help("Deploy on creation true | false").kind(ParamKind::Bool),
    ),
]);

pub static UPDATE_BINDING: SnippetDefinition = SnippetDefinition::new(
    "update-binding",
    r#"
    mutation {
      updateBinding(input:{
        uuid: $uuid
        name: $name
        description: $description
        schedule: $schedule
        variables: $variables
      }){
        binding {
          uuid
          name
          description
          schedule
          variables
          lastDeployed
          accountGroup {
            uuid
            name
          }
          policyCollection {
            uuid
            name
          }
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)])
.optional(&[
    ("name", NAME),
    ("description", DESCRIPTION),
    ("schedule", SCHEDULE),
    ("variables", VARIABLES),
]);

pub static REMOVE_BINDING: SnippetDefinition = SnippetDefinition::new(
    "remove-binding",
    r#"
    mutation {
      removeBinding(uuid: $uuid){
        binding {
          id
          uuid
          name
          description
          schedule
          variables
          lastDeployed
          accountGroup {
            uuid
            name
          }
          policyCollection {
            uuid
            name
          }
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)]);

pub static DEPLOY_BINDING: SnippetDefinition = SnippetDefinition::new(
    "deploy-binding",
    r#"
    mutation {
      deployBinding(uuid: $uuid){
        binding {
          uuid
          name
          description
          schedule
          variables
          lastDeployed
          accountGroup {
            uuid
            name
          }
          policyCollection {
            uuid
            name
          }
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)]);

pub static RUN_BINDING: SnippetDefinition = SnippetDefinition::new(
    "run-binding",
    r#"
    mutation {
      runBinding(input:{uuid: $uuid}){
        binding {
          uuid
          name
          description
          schedule
          variables
          lastDeployed
          accountGroup {
            uuid
            name
          }
          policyCollection {
            uuid
            name
          }
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)]);
