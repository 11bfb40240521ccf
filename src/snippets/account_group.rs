//! Account group snippets

use crate::graphql::snippet::{ParamKind, ParamSpec, SnippetDefinition, help};

const UUID: ParamSpec = help("Account group UUID");
const REGIONS: ParamSpec = help("Cloud Regions").multiple();
const PRIORITY: ParamSpec = help("Account Group priority (0-99)").kind(ParamKind::Int);

pub static LIST_ACCOUNT_GROUPS: SnippetDefinition = SnippetDefinition::new(
    "list-account-groups",
    r#"
    query {
      accountGroups(
        first: $first
        last: $last
        before: "$before"
        after: "$after"
      ) {
        edges {
          node {
            id
            uuid
            name
            shortName
            provider
            description
            regions
            variables
            priority
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
.result_expr("data.accountGroups.edges[].node");

pub static ADD_ACCOUNT_GROUP: SnippetDefinition = SnippetDefinition::new(
    "add-account-group",
    r#"
    mutation {
      addAccountGroup(input:{
        name: "$name"
        provider: $provider
        regions: $region
        shortName: "$short_name"
        description: "$description"
        variables: "$variables"
        priority: $priority
      }){
        group {
          name
          uuid
          id
          shortName
          provider
          description
          regions
          variables
          priority
          itemCount
          items {
            uuid
            key
            provider
            name
            regions
          }
        }
      }
    }
"#,
)
.required(&[
    ("name", help("Account Group Name in Stacklet")),
    ("provider", help("Cloud Provider")),
])
.optional(&[
    ("description", help("Account Group Description")),
    ("short_name", help("Account Group Short Name")),
    ("variables", help("Account Group Variables (JSON encoded)")),
    ("priority", PRIORITY),
    ("region", REGIONS),
])
.parameter_types(&[("provider", "CloudProvider!")])
.result_expr("data.addAccountGroup.group");

pub static UPDATE_ACCOUNT_GROUP: SnippetDefinition = SnippetDefinition::new(
    "update-account-group",
    r#"
    mutation {
      updateAccountGroup(input:{
        uuid: "$uuid"
        name: "$name"
        shortName: "$short_name"
        description: "$description"
        regions: $region
        variables: "$variables"
        priority: $priority
      }){
        group {
          name
          uuid
          id
          shortName
          provider
          description
          regions
          variables
          priority
          itemCount
          items {
            uuid
            key
            provider
            name
            regions
          }
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)])
.optional(&[
    ("region", REGIONS),
    ("name", help("Account Group Name")),
    ("description", help("Account Group Description")),
    ("short_name", help("Account Group Short Name")),
    ("variables", help("Account Group Variables (JSON encoded)")),
    ("priority", PRIORITY),
]);

pub static SHOW_ACCOUNT_GROUP: SnippetDefinition = SnippetDefinition::new(
    "show-account-group",
    r#"
    query {
      accountGroup(
        uuid: "$uuid"
      ) {
        name
        uuid
        id
        shortName
        provider
        description
        regions
        variables
        priority
        itemCount
        items {
          uuid
          key
          provider
          name
          regions
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)]);

pub static REMOVE_ACCOUNT_GROUP: SnippetDefinition = SnippetDefinition::new(
    "remove-account-group",
    r#"
    mutation {
      removeAccountGroup(
        uuid: "$uuid"
      ) {
        group {
          name
          uuid
          id
          shortName
          provider
          description
          regions
          variables
          priority
          itemCount
          items {
            uuid
            key
            provider
            name
            regions
          }
        }
      }
    }
"#,
)
.required(&[("uuid", UUID)]);

pub static ADD_ACCOUNT_GROUP_ITEM: SnippetDefinition = SnippetDefinition::new(
    "add-account-group-item",
    r#"
    mutation {
      addAccountGroupItems(input:{
        uuid: "$uuid"
        items: [
          {
            key: "$key"
            provider: $provider
            regions: $regions
          }
        ]
      }) {
        group {
          name
          uuid
          id
          shortName
          provider
          description
          regions
          variables
          priority
          itemCount
          items {
            uuid
            key
            provider
            name
            regions
          }
        }
      }
    }
"#,
)
.required(&[
    ("uuid", UUID),
    ("key", help("Account Key")),
    ("provider", help("Account Provider")),
])
.optional(&[("regions", help("Account Regions").multiple())])
.parameter_types(&[("provider", "CloudProvider!")]);

pub static REMOVE_ACCOUNT_GROUP_ITEM: SnippetDefinition = SnippetDefinition::new(
    "remove-account-group-item",
    r#"
    mutation {
      removeAccountGroupItems(input:{
        uuid: "$uuid"
        items: [
          {
            key: "$key"
            provider: $provider
          }
        ]
      }) {
        group {
          name
          uuid
          id
          shortName
          provider
          description
          regions
          variables
          priority
          itemCount
          items {
            uuid
            key
            provider
            name
            regions
          }
        }
      }
    }
"#,
)
.required(&[
    ("uuid", UUID),
    ("key", help("Account Key")),
    ("provider", help("Account Provider")),
])
.parameter_types(&[("provider", "CloudProvider!")]);
