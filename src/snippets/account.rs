//! Account snippets

use crate::graphql::snippet::{ParamSpec, SnippetDefinition, help, json_list};

const PROVIDERS: &[&str] = &["AWS", "Azure", "GCP", "Kubernetes"];

const PROVIDER: ParamSpec =
    help("Account Provider: AWS | Azure | GCP | Kubernetes").choices(PROVIDERS);
const KEY: ParamSpec =
    help("Account key -- Account ID for AWS, Subscription ID for Azure, Project ID for GCP");
const TAGS: ParamSpec = help(
    r#"List of tags for Account, e.g. --tags '[{"key": "department", "value": "marketing"}]'"#,
);
const VARIABLES: ParamSpec =
    help(r#"JSON encoded string of variables e.g. --variables '{"foo": "bar"}'"#);

pub static LIST_ACCOUNTS: SnippetDefinition = SnippetDefinition::new(
    "list-accounts",
    r#"
    query {
      accounts(
        first: $first
        last: $last
        before: "$before"
        after: "$after"
      ) {
        edges {
          node {
            id
            key
            name
            shortName
            description
            provider
            path
            email
            securityContext
            tags {
              key
              value
            }
            variables
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
.pagination_expr("data.accounts.pageInfo")
.result_expr("data.accounts.edges[].node");

pub static SHOW_ACCOUNT: SnippetDefinition = SnippetDefinition::new(
    "show-account",
    r#"
    query {
      account(
        provider: $provider
        key: "$key"
      ) {
        id
        key
        active
        name
        shortName
        description
        provider
        path
        email
        securityContext
        tags {
          key
          value
        }
        variables
      }
    }
"#,
)
.required(&[("provider", PROVIDER), ("key", KEY)])
.parameter_types(&[("provider", "CloudProvider!")]);

pub static UPDATE_ACCOUNT: SnippetDefinition = SnippetDefinition::new(
    "update-account",
    r#"
    mutation {
      updateAccount(input:{
        provider: $provider
        key: "$key"
        name: "$name"
        email: "$email"
        description: "$description"
        shortName: "$short_name"
        tags: $tags
        variables: "$variables"
        securityContext: "$security_context"
      }){
        account {
          id
          key
          name
          shortName
          description
          provider
          path
          email
          securityContext
          tags {
            key
            value
          }
          variables
        }
      }
    }
"#,
)
.required(&[("provider", PROVIDER), ("key", KEY)])
.optional(&[
    ("name", help("Account Name")),
    ("email", help("Account Email Address")),
    ("security_context", help("Role for Custodian policy execution")),
    ("short_name", help("Short Name for Account")),
    ("description", help("Description for Account")),
    ("tags", TAGS),
    ("variables", VARIABLES),
])
.parameter_types(&[("provider", "CloudProvider!"), ("tags", "[TagInput!]")])
.transformers(&[("tags", json_list)]);

pub static ADD_ACCOUNT: SnippetDefinition = SnippetDefinition::new(
    "add-account",
    r#"
    mutation {
      addAccount(input:{
        provider: $provider
        key: "$key"
        name: "$name"
        path: "$path"
        email: "$email"
        securityContext: "$security_context"
        shortName: "$short_name"
        description: "$description"
        tags: $tags
        variables: "$variables"
      }){
        account {
          id
          key
          name
          shortName
          description
          provider
          path
          email
          securityContext
          tags {
            key
            value
          }
          variables
        }
      }
    }
"#,
)
.required(&[
    ("name", help("Account Name in Stacklet")),
    ("key", KEY),
    ("provider", PROVIDER),
    ("security_context", help("Role for Custodian policy execution")),
])
.optional(&[
    ("path", help("Account Path")),
    ("email", help("Account Email Address")),
    ("short_name", help("Short Name for Account")),
    ("description", help("Description for Account")),
    ("tags", TAGS),
    ("variables", VARIABLES),
])
.parameter_types(&[("provider", "CloudProvider!"), ("tags", "[TagInput!]")])
.transformers(&[("tags", json_list)])
.result_expr("data.addAccount.account");

pub static REMOVE_ACCOUNT: SnippetDefinition = SnippetDefinition::new(
    "remove-account",
    r#"
    mutation {
      removeAccount(
        provider: $provider,
        key: "$key",
      ){
        account {
          id
          key
          name
          shortName
          description
          provider
          path
          email
          securityContext
          tags {
            key
            value
          }
          variables
        }
      }
    }
"#,
)
.required(&[("provider", PROVIDER), ("key", KEY)])
.parameter_types(&[("provider", "CloudProvider!")]);

pub static VALIDATE_ACCOUNT: SnippetDefinition = SnippetDefinition::new(
    "validate-account",
    r#"
    mutation {
      validateAccount(
        input: {
          provider: $provider,
          key: "$key",
        }
      ){
        account {
          id
          key
          name
          shortName
          description
          provider
          path
          email
          securityContext
          tags {
            key
            value
          }
          variables
          status
          status_message
        }
      }
    }
"#,
)
.required(&[("provider", PROVIDER), ("key", KEY)])
.parameter_types(&[("provider", "CloudProvider!")]);
