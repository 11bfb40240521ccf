//! Path expansion and default locations

use crate::error::PlatformError;
use crate::system::System;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Directory under the home directory holding config and credentials
pub const CONFIG_DIR_NAME: &str = ".stacklet";

/// File name of the default configuration file
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Expand a leading `~` against the home directory reported by `system`
///
/// Paths without a leading `~` are returned unchanged.
///
/// # Errors
///
/// Returns an error if the path starts with `~` and no home directory is known
pub fn expand_user_path(system: &dyn System, path: &Path) -> Result<PathBuf> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };

    let home = system.home_dir().ok_or_else(|| {
        PlatformError::configuration(format!(
            "Cannot expand '{}': home directory is unknown",
            path.display()
        ))
    })?;

    Ok(home.join(rest))
}

/// Default configuration directory (`~/.stacklet`)
///
/// # Errors
///
/// Returns an error if no home directory is known
pub fn default_config_dir(system: &dyn System) -> Result<PathBuf> {
    expand_user_path(system, &Path::new("~").join(CONFIG_DIR_NAME))
}

/// Default configuration file (`~/.stacklet/config.json`)
///
/// # Errors
///
/// Returns an error if no home directory is known
pub fn default_config_file(system: &dyn System) -> Result<PathBuf> {
    Ok(default_config_dir(system)?.join(CONFIG_FILE_NAME))
}
