//! Policy snippets

use crate::graphql::snippet::{SnippetDefinition, help};

pub static LIST_POLICIES: SnippetDefinition = SnippetDefinition::new(
    "list-policies",
    r#"
    query {
      policies(
        first: $first
        last: $last
        before: "$before"
        after: "$after"
      ) {
        edges {
          node {
            id
            uuid
            version
            name
            description
            category
            compliance
            severity
            resourceType
            provider
            resource
            mode
            tags {
              key
              value
            }
            commit {
              hash
              author
              msg
            }
            repository {
              id
              url
              name
            }
            path
            source
            validationError
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
.pagination_expr("data.policies.pageInfo")
.result_expr("data.policies.edges[].node");

pub static SHOW_POLICY: SnippetDefinition = SnippetDefinition::new(
    "show-policy",
    r#"
    query {
      policy(
        name: "$name"
        uuid: "$uuid"
      ) {
        id
        uuid
        version
        name
        description
        category
        compliance
        severity
        resourceType
        provider
        resource
        mode
        tags {
          key
          value
        }
        commit {
          hash
          author
          msg
        }
        repository {
          id
          url
          name
        }
        path
        source
        sourceYAML
        lastExecution {
          id
          uuid
          account {
            id
            key
            name
            path
            email
            status
            status_message
            validated_at
          }
          start
          end
          status
          issues
          metricResources
          metricDuration
          metricApiCalls
          metricException
          metricRateLimitExceeded
          paramCache
          paramRegion
          paramDryrun
          runner
        }
      }
    }
"#,
)
.optional(&[("name", help("Policy Name")), ("uuid", help("Policy UUID"))]);
