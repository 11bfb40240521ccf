//! Command-line interface module
//!
//! Global options and the static commands are declared with clap's derive
//! API; the snippet groups are appended from [`groups::GROUPS`].

pub mod args;
pub mod commands;
pub mod groups;

pub use args::GlobalArgs;
pub use commands::StaticCommand;
pub use groups::{CommandGroup, GROUPS, GraphQLCommand};

use crate::context::Context;
use crate::error::PlatformError;
use crate::graphql::SnippetRegistry;
use anyhow::Result;
use clap::{ArgMatches, Args as _, Command, FromArgMatches as _, Subcommand as _};
use std::ffi::OsString;
use std::io::Write;

/// Build the full command line
///
/// # Errors
///
/// Returns an unknown snippet error if a command names an unregistered snippet
pub fn build_cli(registry: &SnippetRegistry) -> Result<Command> {
    let cli = GlobalArgs::augment_args(Command::new("stacklet-admin"));
    let mut cli = StaticCommand::augment_subcommands(cli)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Command line client for the Stacklet platform API")
        .subcommand_required(true)
        .arg_required_else_help(true);
    for group in &GROUPS {
        cli = cli.subcommand(group.command(registry)?);
    }
    Ok(cli)
}

/// A parsed command line
#[derive(Debug, Clone)]
pub struct Invocation {
    pub global: GlobalArgs,
    matches: ArgMatches,
}

impl Invocation {
    /// Parse `argv`, program name included
    ///
    /// # Errors
    ///
    /// Returns the [`clap::Error`] for invalid arguments, `--help` and `--version`
    pub fn parse<I, T>(registry: &SnippetRegistry, argv: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = build_cli(registry)?.try_get_matches_from(argv)?;
        let global = GlobalArgs::from_arg_matches(&matches)?;
        Ok(Self { global, matches })
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns the first failure of the command
    pub fn dispatch(&self, context: &Context<'_>, out: &mut dyn Write) -> Result<()> {
        let Some((name, matches)) = self.matches.subcommand() else {
            return Err(PlatformError::invalid_input("No command given").into());
        };
        if let Some(group) = groups::find(name) {
            return group.run(matches, context, out);
        }
        StaticCommand::from_arg_matches(&self.matches)?.execute(context, out)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use crate::snippets;
    use std::path::Path;

    #[test]
    fn cli_is_consistent() {
        build_cli(&snippets::registry().unwrap()).unwrap().debug_assert();
    }

    #[test]
    fn program_description_survives_global_args() {
        let cli = build_cli(&snippets::registry().unwrap()).unwrap();
        assert_eq!(
            cli.get_about().map(ToString::to_string).as_deref(),
            Some("Command line client for the Stacklet platform API")
        );
        assert!(cli.get_long_about().is_none());
    }

    #[test]
    fn global_options_after_subcommand() {
        let registry = snippets::registry().unwrap();
        let invocation = Invocation::parse(
            &registry,
            ["stacklet-admin", "account", "list", "--output", "JSON", "-vv"],
        )
        .unwrap();
        assert_eq!(invocation.global.output, OutputFormat::Json);
        assert_eq!(invocation.global.verbose, 2);
        assert_eq!(invocation.global.config, Path::new("~/.stacklet/config.json"));
    }

    #[test]
    fn synthesized_options_are_enforced() {
        let registry = snippets::registry().unwrap();
        let missing = Invocation::parse(&registry, ["stacklet-admin", "account", "show", "--key", "1"]);
        assert!(missing.is_err());
        let bad_choice = Invocation::parse(
            &registry,
            ["stacklet-admin", "account", "show", "--provider", "Oracle", "--key", "1"],
        );
        assert!(bad_choice.is_err());
    }

    #[test]
    fn help_is_a_clap_error() {
        let registry = snippets::registry().unwrap();
        let err = Invocation::parse(&registry, ["stacklet-admin", "--help"]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<clap::Error>().map(clap::Error::kind),
            Some(clap::error::ErrorKind::DisplayHelp)
        );
    }
}
