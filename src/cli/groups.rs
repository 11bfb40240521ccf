//! Snippet-backed command groups
//!
//! Each leaf command runs one registered snippet; its options are
//! synthesized from the snippet definition when the command line is built.

use crate::client::check_errors;
use crate::context::Context;
use crate::error::PlatformError;
use crate::graphql::options::{args_for, collect_variables};
use crate::graphql::{SnippetDefinition, SnippetRef, SnippetRegistry};
use crate::utils::expand_user_path;
use anyhow::{Context as _, Result};
use clap::{ArgMatches, Command};
use serde_json::{Map, Value};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Validates and possibly rewrites the collected variables before the request is built
pub type PreCheck = fn(&Context<'_>, Map<String, Value>) -> Result<Map<String, Value>>;

/// What a command does with its snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run the snippet and print the formatted response
    Print,
    /// List every account, then validate each one
    ValidateAll,
    /// Print the `sourceYAML` of a policy
    ShowSource,
}

/// A command line command backed by a snippet
#[derive(Debug, Clone, Copy)]
pub struct GraphQLCommand {
    pub name: &'static str,
    pub snippet: &'static str,
    pub help: &'static str,
    pub pre_check: Option<PreCheck>,
    pub action: Action,
}

impl GraphQLCommand {
    const fn new(name: &'static str, snippet: &'static str, help: &'static str) -> Self {
        Self {
            name,
            snippet,
            help,
            pre_check: None,
            action: Action::Print,
        }
    }

    const fn pre_check(mut self, check: PreCheck) -> Self {
        self.pre_check = Some(check);
        self
    }

    const fn action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    fn definition(&self, registry: &SnippetRegistry) -> Result<&'static SnippetDefinition, PlatformError> {
        registry.resolve(self.snippet)
    }
}

/// A group of snippet commands, e.g. `account`
#[derive(Debug, Clone, Copy)]
pub struct CommandGroup {
    pub name: &'static str,
    pub short_help: &'static str,
    pub help: &'static str,
    pub commands: &'static [GraphQLCommand],
}

impl CommandGroup {
    /// Build the clap command for this group
    ///
    /// # Errors
    ///
    /// Returns an unknown snippet error if a command names an unregistered snippet
    pub fn command(&self, registry: &SnippetRegistry) -> Result<Command> {
        let mut group = Command::new(self.name)
            .about(self.short_help)
            .long_about(self.help)
            .subcommand_required(true)
            .arg_required_else_help(true);
        for command in self.commands {
            let definition = command.definition(registry)?;
            group = group.subcommand(
                Command::new(command.name)
                    .about(command.help)
                    .args(args_for(definition)),
            );
        }
        Ok(group)
    }

    /// Run the subcommand selected in `matches`
    ///
    /// # Errors
    ///
    /// Returns the first failure of the pre-check, the request or the output
    pub fn run(&self, matches: &ArgMatches, context: &Context<'_>, out: &mut dyn Write) -> Result<()> {
        let Some((name, leaf)) = matches.subcommand() else {
            return Err(PlatformError::invalid_input(format!("{}: missing subcommand", self.name)).into());
        };
        let command = self
            .commands
            .iter()
            .find(|command| command.name == name)
            .ok_or_else(|| PlatformError::invalid_input(format!("{}: unknown subcommand {name}", self.name)))?;

        let definition = command.definition(context.registry())?;
        let mut variables = collect_variables(definition, leaf);
        if let Some(check) = command.pre_check {
            variables = check(context, variables)?;
        }
        debug!("{} {}: running {}", self.name, command.name, definition.name);

        match command.action {
            Action::Print => {
                let result = context
                    .executor()?
                    .run(SnippetRef::Definition(definition), &variables)?;
                writeln!(out, "{}", context.format(&result)?)?;
            }
            Action::ValidateAll => validate_all(definition, variables, context, out)?,
            Action::ShowSource => {
                let result = context
                    .executor()?
                    .run(SnippetRef::Definition(definition), &variables)?;
                check_errors(&result)?;
                match result.pointer("/data/policy/sourceYAML") {
                    Some(Value::String(source)) => writeln!(out, "{source}")?,
                    _ => writeln!(out, "{}", context.format(&result)?)?,
                }
            }
        }
        Ok(())
    }
}

/// Snippet groups in the order they appear in `--help`
pub static GROUPS: [CommandGroup; 6] = [
    CommandGroup {
        name: "account",
        short_help: "Run account queries/mutations",
        help: "Query against and Run mutations against Account objects in Stacklet.",
        commands: &[
            GraphQLCommand::new("list", "list-accounts", "List cloud accounts in Stacklet"),
            GraphQLCommand::new("add", "add-account", "Add an account to Stacklet"),
            GraphQLCommand::new("remove", "remove-account", "Remove an account from Stacklet"),
            GraphQLCommand::new("update", "update-account", "Update an account in Stacklet"),
            GraphQLCommand::new("show", "show-account", "Show an account in Stacklet"),
            GraphQLCommand::new("validate", "validate-account", "Validate an account in Stacklet"),
            GraphQLCommand::new("validate-all", "list-accounts", "Validate all accounts in Stacklet")
                .action(Action::ValidateAll),
        ],
    },
    CommandGroup {
        name: "account-group",
        short_help: "Run account group queries/mutations",
        help: "Manage account groups",
        commands: &[
            GraphQLCommand::new("list", "list-account-groups", "List account groups in Stacklet"),
            GraphQLCommand::new("add", "add-account-group", "Add account group"),
            GraphQLCommand::new("update", "update-account-group", "Update account group"),
            GraphQLCommand::new("show", "show-account-group", "Show account group"),
            GraphQLCommand::new("remove", "remove-account-group", "Remove account group"),
            GraphQLCommand::new("add-item", "add-account-group-item", "Add account group item"),
            GraphQLCommand::new("remove-item", "remove-account-group-item", "Remove account group item"),
        ],
    },
    CommandGroup {
        name: "binding",
        short_help: "Run binding queries/mutations",
        help: "Query and run mutations against bindings in Stacklet Platform",
        commands: &[
            GraphQLCommand::new("list", "list-bindings", "List bindings in Stacklet"),
            GraphQLCommand::new("show", "show-binding", "Show binding in Stacklet"),
            GraphQLCommand::new("add", "add-binding", "Add binding in Stacklet"),
            GraphQLCommand::new("update", "update-binding", "Update binding in Stacklet"),
            GraphQLCommand::new("remove", "remove-binding", "Remove binding in Stacklet"),
            GraphQLCommand::new("deploy", "deploy-binding", "Deploy binding in Stacklet"),
            GraphQLCommand::new("run", "run-binding", "Run a binding in Stacklet"),
        ],
    },
    CommandGroup {
        name: "policy",
        short_help: "Run policy queries",
        help: "Manage policies",
        commands: &[
            GraphQLCommand::new("list", "list-policies", "List policies in Stacklet"),
            GraphQLCommand::new(
                "show",
                "show-policy",
                "Show policy in Stacklet by either name or uuid",
            )
            .pre_check(name_or_uuid),
            GraphQLCommand::new(
                "show-source",
                "show-policy",
                "Show policy source in Stacklet by either name or uuid",
            )
            .pre_check(name_or_uuid)
            .action(Action::ShowSource),
        ],
    },
    CommandGroup {
        name: "policy-collection",
        short_help: "Run policy collection queries/mutations",
        help: "Manage policy collections",
        commands: &[
            GraphQLCommand::new("list", "list-policy-collections", "List policy collections in Stacklet"),
            GraphQLCommand::new("add", "add-policy-collection", "Add policy collection in Stacklet"),
            GraphQLCommand::new("show", "show-policy-collection", "Show policy collection in Stacklet"),
            GraphQLCommand::new("update", "update-policy-collection", "Update policy collection in Stacklet"),
            GraphQLCommand::new(
                "add-item",
                "add-policy-collection-item",
                "Add item to policy collection in Stacklet",
            ),
            GraphQLCommand::new("remove", "remove-policy-collection", "Remove policy collection in Stacklet"),
            GraphQLCommand::new(
                "remove-item",
                "remove-policy-collection-item",
                "Remove item from a policy collection in Stacklet",
            ),
        ],
    },
    CommandGroup {
        name: "repository",
        short_help: "Run repository queries/mutations",
        help: "Query against and Run mutations against Repository objects in Stacklet",
        commands: &[
            GraphQLCommand::new("add", "add-repository", "Add a Policy Repository to Stacklet")
                .pre_check(read_private_key),
            GraphQLCommand::new("process", "process-repository", "Process a Policy Repository in Stacklet"),
            GraphQLCommand::new("list", "list-repository", "List repositories"),
            GraphQLCommand::new("remove", "remove-repository", "Remove a Policy Repository to Stacklet"),
            GraphQLCommand::new("scan", "scan-repository", "Scan a repository for policies"),
            GraphQLCommand::new("show", "show-repository", "Show a repository"),
        ],
    },
];

/// Group called `name`, if any
#[must_use]
pub fn find(name: &str) -> Option<&'static CommandGroup> {
    GROUPS.iter().find(|group| group.name == name)
}

fn is_set(variables: &Map<String, Value>, name: &str) -> bool {
    match variables.get(name) {
        None | Some(Value::Null) => false,
        Some(Value::String(value)) => !value.is_empty(),
        Some(_) => true,
    }
}

/// Exactly one of `--name` and `--uuid`
fn name_or_uuid(_: &Context<'_>, variables: Map<String, Value>) -> Result<Map<String, Value>> {
    match (is_set(&variables, "name"), is_set(&variables, "uuid")) {
        (true, true) => Err(PlatformError::invalid_input("Either name or uuid can be set, but not both").into()),
        (false, false) => Err(PlatformError::invalid_input("Either name or uuid must be set").into()),
        _ => Ok(variables),
    }
}

/// Replace the `--ssh-private-key` path with the key itself
fn read_private_key(context: &Context<'_>, mut variables: Map<String, Value>) -> Result<Map<String, Value>> {
    let path = match variables.get("ssh_private_key") {
        Some(Value::String(path)) => path.clone(),
        _ => return Ok(variables),
    };
    if !is_set(&variables, "auth_user") {
        return Err(PlatformError::invalid_input("Both --auth-user and --ssh-private-key are required").into());
    }

    let path = expand_user_path(context.system(), Path::new(&path))?;
    let key = context
        .system()
        .read_to_string(&path)
        .with_context(|| format!("Failed to read SSH private key: {}", path.display()))?;
    variables.insert(
        "ssh_private_key".to_owned(),
        Value::String(key.trim_matches('\n').to_owned()),
    );
    Ok(variables)
}

fn validate_all(
    list_accounts: &SnippetDefinition,
    mut variables: Map<String, Value>,
    context: &Context<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let executor = context.executor()?;

    let first = executor.run(SnippetRef::Definition(list_accounts), &variables)?;
    check_errors(&first)?;
    let total = first
        .pointer("/data/accounts/pageInfo/total")
        .cloned()
        .unwrap_or(Value::Null);
    variables.insert("last".to_owned(), total);

    let all = executor.run(SnippetRef::Definition(list_accounts), &variables)?;
    check_errors(&all)?;
    let edges = all
        .pointer("/data/accounts/edges")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let validate = context.registry().resolve("validate-account")?;
    for edge in edges {
        let mut account = Map::new();
        for key in ["provider", "key"] {
            account.insert(
                key.to_owned(),
                edge.pointer(&format!("/node/{key}")).cloned().unwrap_or(Value::Null),
            );
        }
        let result = executor.run(SnippetRef::Definition(validate), &account)?;
        writeln!(out, "{}", context.format(&result)?)?;
    }
    Ok(())
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::graphql::transport::MockTransport;
    use crate::output::OutputFormat;
    use crate::snippets;
    use crate::system::MockSystem;
    use serde_json::json;

    fn vars(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn every_command_names_a_registered_snippet() {
        let registry = snippets::registry().unwrap();
        for group in &GROUPS {
            let command = group.command(&registry).unwrap();
            assert_eq!(command.get_subcommands().count(), group.commands.len());
        }
    }

    #[test]
    fn group_lookup() {
        assert_eq!(find("policy-collection").map(|g| g.commands.len()), Some(7));
        assert!(find("user").is_none());
    }

    #[test]
    fn policy_show_needs_exactly_one_selector() {
        let system = MockSystem::new();
        let transport = MockTransport::new();
        let registry = SnippetRegistry::default();
        let context =
            Context::new(&system, &transport, &registry, Path::new("/c.json"), OutputFormat::Yaml)
                .unwrap();

        let both = name_or_uuid(&context, vars(json!({"name": "n", "uuid": "u"})));
        assert!(both.unwrap_err().to_string().contains("not both"));
        let neither = name_or_uuid(&context, vars(json!({"name": null, "uuid": null})));
        assert!(neither.unwrap_err().to_string().contains("must be set"));
        assert!(name_or_uuid(&context, vars(json!({"name": "n", "uuid": null}))).is_ok());
    }

    #[test]
    fn private_key_is_read_from_file() {
        let system = MockSystem::new()
            .with_file("/home/user/.ssh/id", b"-----KEY-----\n")
            .unwrap();
        let transport = MockTransport::new();
        let registry = SnippetRegistry::default();
        let context =
            Context::new(&system, &transport, &registry, Path::new("/c.json"), OutputFormat::Yaml)
                .unwrap();

        let variables = read_private_key(
            &context,
            vars(json!({"ssh_private_key": "~/.ssh/id", "auth_user": "git"})),
        )
        .unwrap();
        assert_eq!(variables["ssh_private_key"], json!("-----KEY-----"));

        let err = read_private_key(&context, vars(json!({"ssh_private_key": "~/.ssh/id"})));
        assert!(err.is_err());

        let untouched = read_private_key(&context, vars(json!({"ssh_private_key": null}))).unwrap();
        assert_eq!(untouched["ssh_private_key"], Value::Null);
    }
}
