//! `stacklet-admin` - command line client and library for the Stacklet platform API
//!
//! Named GraphQL snippets are compiled into requests, posted to the
//! platform's GraphQL endpoint and the responses printed as `plain`, `json`
//! or `yaml`. Every snippet is exposed as a command with options synthesized
//! from its declared parameters, and as a method of
//! [`client::PlatformClient`].

pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod cubejs;
pub mod error;
pub mod graphql;
pub mod output;
pub mod snippets;
pub mod system;
pub mod utils;

use anyhow::Result;
use cli::Invocation;
use context::Context;
use graphql::SnippetRegistry;
use graphql::transport::Transport;
use std::ffi::OsString;
use std::io::Write;
use system::System;

/// Run a parsed invocation
///
/// # Errors
///
/// Returns the first failure of the command
pub fn execute(
    invocation: &Invocation,
    system: &dyn System,
    transport: &dyn Transport,
    registry: &SnippetRegistry,
    out: &mut dyn Write,
) -> Result<()> {
    let context = Context::new(
        system,
        transport,
        registry,
        &invocation.global.config,
        invocation.global.output,
    )?;
    invocation.dispatch(&context, out)
}

/// Parse `argv` and run it against the built-in snippet catalog
///
/// # Errors
///
/// Returns a [`clap::Error`] for invalid arguments, otherwise the first
/// failure of the command
pub fn run_with<I, T>(
    argv: I,
    system: &dyn System,
    transport: &dyn Transport,
    out: &mut dyn Write,
) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let registry = snippets::registry()?;
    let invocation = Invocation::parse(&registry, argv)?;
    execute(&invocation, system, transport, &registry, out)
}
