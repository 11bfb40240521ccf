//! Policy repository snippets

use crate::graphql::snippet::{SnippetDefinition, help, string_to_bool};

const URL: &str = "Policy Repository URL";

pub static ADD_REPOSITORY: SnippetDefinition = SnippetDefinition::new(
    "add-repository",
    r#"
    mutation {
      addRepository(
        input: {
          url: $url
          name: $name
          description: $description
          sshPassphrase: $ssh_passphrase
          sshPrivateKey: $ssh_private_key
          authUser: $auth_user
          authToken: $auth_token
          branchName: $branch_name
          policyFileSuffix: $policy_file_suffix
          policyDirectories: $policy_directory
          deepImport: $deep_import
        }
      ) {
        repository {
          url
          name
        }
      }
    }
"#,
)
.required(&[
    ("url", help(URL)),
    ("name", help("Human Readable Policy Repository Name")),
])
.optional(&[
    ("description", help("Repo Description")),
    ("ssh_passphrase", help("SSH Passphrase for Private Key")),
    ("ssh_private_key", help("Path to a SSH Private Key")),
    ("auth_user", help("Auth User for repository access")),
    ("auth_token", help("Auth token for repository access")),
    ("branch_name", help("Git Branch Name")),
    (
        "policy_file_suffix",
        help("Policy File Suffix, repeat for several, e.g. --policy-file-suffix .yaml").multiple(),
    ),
    (
        "policy_directory",
        help("Policy Directory, repeat for several, e.g. --policy-directory policies").multiple(),
    ),
    ("deep_import", help("Deep Import Repository true | false")),
])
.transformers(&[("deep_import", string_to_bool)])
.result_expr("data.addRepository.repository");

pub static PROCESS_REPOSITORY: SnippetDefinition = SnippetDefinition::new(
    "process-repository",
    r#"
    mutation {
      processRepository(input:{url: $url})
    }
"#,
)
.required(&[("url", help("Repository URL to process"))]);

pub static LIST_REPOSITORY: SnippetDefinition = SnippetDefinition::new(
    "list-repository",
    r#"
    query {
      repositories {
        edges {
          node {
            id
            name
            url
            policyFileSuffix
            policyDirectories
            branchName
            authUser
            sshPublicKey
            head
            lastScanned
            provider
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
.result_expr("data.repositories.edges[].node");

pub static REMOVE_REPOSITORY: SnippetDefinition = SnippetDefinition::new(
    "remove-repository",
    r#"
    mutation {
      removeRepository(
        url: $url
      ) {
        repository {
          url
          name
        }
      }
    }
"#,
)
.required(&[("url", help(URL))])
.result_expr("data.removeRepository.repository");

pub static SCAN_REPOSITORY: SnippetDefinition = SnippetDefinition::new(
    "scan-repository",
    r#"
    mutation {
      processRepository(input:{
        url: $url
        startRevSpec: $start_rev_spec
      })
    }
"#,
)
.required(&[("url", help(URL))])
.optional(&[("start_rev_spec", help("Start Rev Spec"))]);

pub static SHOW_REPOSITORY: SnippetDefinition = SnippetDefinition::new(
    "show-repository",
    r#"
    query {
      repository(url: $url) {
        id
        name
        url
        policyFileSuffix
        policyDirectories
        branchName
        authUser
        sshPublicKey
        head
        lastScanned
        provider
        scans {
          edges {
            node {
              started
              completed
              head
              error
              commitsProcessed
              policiesAdded
              policiesModified
              policiesRemoved
              policiesInvalid
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
    }
"#,
)
.required(&[("url", help("Repository URL to process"))]);
