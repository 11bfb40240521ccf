//! # `stacklet-admin`
//!
//! Command line client for the Stacklet platform API.
//!
//! ## Usage
//!
//! ```sh
//! stacklet-admin auto-configure --prefix myorg
//! stacklet-admin account list --first 50
//! stacklet-admin --output json policy show --name my-policy
//! echo 'query { platform { version } }' | stacklet-admin graphql run
//! ```
//!
//! See `stacklet-admin --help` for every command.

use stacklet_admin::cli::Invocation;
use stacklet_admin::error::PlatformError;
use stacklet_admin::graphql::transport::ReqwestTransport;
use stacklet_admin::snippets;
use stacklet_admin::system::RealSystem;
use stacklet_admin::utils::log_level;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PlatformError>()
        .map_or(1, PlatformError::exit_code)
}

fn main() {
    let registry = match snippets::registry() {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(exit_code(&err));
        }
    };

    let invocation = match Invocation::parse(&registry, std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => {
            if let Some(clap_err) = err.downcast_ref::<clap::Error>() {
                clap_err.exit();
            }
            eprintln!("{err}");
            std::process::exit(exit_code(&err));
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(invocation.global.verbose)));
    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let system = RealSystem::new();
    let result = ReqwestTransport::new().and_then(|transport| {
        let mut stdout = std::io::stdout().lock();
        stacklet_admin::execute(&invocation, &system, &transport, &registry, &mut stdout)
    });

    match result {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{}", err);
            std::process::exit(exit_code(&err));
        }
    }
}
