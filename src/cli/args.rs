use crate::output::OutputFormat;
use clap::Args;
use std::path::PathBuf;

/// Default location of the configuration file
pub const DEFAULT_CONFIG: &str = "~/.stacklet/config.json";

/// Options accepted by every command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Configuration file path
    #[arg(
        long,
        value_name = "PATH",
        env = "STACKLET_CONFIG",
        default_value = DEFAULT_CONFIG,
        global = true
    )]
    pub config: PathBuf,

    /// Output format
    #[arg(
        long,
        value_enum,
        env = "STACKLET_OUTPUT",
        default_value_t = OutputFormat::Yaml,
        ignore_case = true,
        global = true
    )]
    pub output: OutputFormat,

    /// Verbosity level, repeat for more (-v warn, -vv info, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}
