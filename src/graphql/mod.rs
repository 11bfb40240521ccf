//! GraphQL snippet engine
//!
//! Snippet definitions, the builder that turns them into requests, the
//! registry, command line option synthesis, the HTTP transport and the
//! executor.

pub mod builder;
pub mod executor;
pub mod options;
pub mod registry;
pub mod snippet;
pub mod transport;

pub use builder::{RequestObject, build, build_adhoc, gql_type};
pub use executor::{GraphQLExecutor, SnippetRef};
pub use registry::SnippetRegistry;
pub use snippet::{ParamKind, ParamSpec, SnippetDefinition, Transformer, help};
