//! Small helpers shared across commands

pub mod logging;
pub mod path;

pub use logging::log_level;
pub use path::{default_config_dir, default_config_file, expand_user_path};
