//! Stored API credentials
//!
//! The access token lives in `<config dir>/credentials` and the id token in
//! `<config dir>/id`. `STACKLET_API_KEY` takes precedence over the stored
//! access token.

use crate::system::System;
use crate::utils::default_config_dir;
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the stored access token
pub const API_KEY_ENV: &str = "STACKLET_API_KEY";

const ACCESS_TOKEN_FILE: &str = "credentials";
const ID_TOKEN_FILE: &str = "id";

/// Token store rooted at a configuration directory
pub struct Credentials<'a> {
    system: &'a dyn System,
    config_dir: PathBuf,
}

impl<'a> Credentials<'a> {
    /// Credentials stored under an explicit directory
    pub fn new(system: &'a dyn System, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            system,
            config_dir: config_dir.into(),
        }
    }

    /// Credentials stored under `~/.stacklet`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory is unknown
    pub fn from_default_dir(system: &'a dyn System) -> Result<Self> {
        Ok(Self::new(system, default_config_dir(system)?))
    }

    /// Directory holding the token files
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Token used to authorize API calls, if any
    #[must_use]
    pub fn api_token(&self) -> Option<String> {
        if let Ok(token) = self.system.env_var(API_KEY_ENV)
            && !token.trim().is_empty()
        {
            debug!("Using API token from {API_KEY_ENV}");
            return Some(token.trim().to_owned());
        }
        self.read_token(ACCESS_TOKEN_FILE)
    }

    /// Identity token from the last login, if any
    #[must_use]
    pub fn id_token(&self) -> Option<String> {
        self.read_token(ID_TOKEN_FILE)
    }

    /// Persist the id and access tokens
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or either file cannot be written
    pub fn write(&self, id_token: &str, access_token: &str) -> Result<()> {
        self.system
            .create_dir_all(&self.config_dir)
            .with_context(|| format!("Failed to create directory: {}", self.config_dir.display()))?;

        for (file, token) in [(ID_TOKEN_FILE, id_token), (ACCESS_TOKEN_FILE, access_token)] {
            let path = self.config_dir.join(file);
            self.system
                .write(&path, token.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(())
    }

    fn read_token(&self, file: &str) -> Option<String> {
        let path = self.config_dir.join(file);
        if !self.system.is_file(&path) {
            return None;
        }
        let content = self.system.read_to_string(&path).ok()?;
        let token = content.trim();
        (!token.is_empty()).then(|| token.to_owned())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn env_var_wins_over_file() {
        let system = MockSystem::new()
            .with_env(API_KEY_ENV, "from-env")
            .unwrap()
            .with_file("/home/user/.stacklet/credentials", b"from-file")
            .unwrap();
        let creds = Credentials::from_default_dir(&system).unwrap();
        assert_eq!(creds.api_token().as_deref(), Some("from-env"));
    }

    #[test]
    fn falls_back_to_file() {
        let system = MockSystem::new()
            .with_file("/home/user/.stacklet/credentials", b"from-file\n")
            .unwrap();
        let creds = Credentials::from_default_dir(&system).unwrap();
        assert_eq!(creds.api_token().as_deref(), Some("from-file"));
    }

    #[test]
    fn empty_file_counts_as_absent() {
        let system = MockSystem::new()
            .with_file("/home/user/.stacklet/credentials", b"  \n")
            .unwrap();
        let creds = Credentials::from_default_dir(&system).unwrap();
        assert!(creds.api_token().is_none());
        assert!(creds.id_token().is_none());
    }

    #[test]
    fn write_persists_both_tokens() {
        let system = MockSystem::new();
        let creds = Credentials::new(&system, "/somewhere/.stacklet");
        creds.write("id-token", "access-token").unwrap();

        assert_eq!(creds.id_token().as_deref(), Some("id-token"));
        assert_eq!(creds.api_token().as_deref(), Some("access-token"));
        assert_eq!(
            system
                .read_to_string(Path::new("/somewhere/.stacklet/credentials"))
                .unwrap(),
            "access-token"
        );
    }
}
