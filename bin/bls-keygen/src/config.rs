//! Optional TOML configuration for the CLI.
//!
//! ```toml
//! seed_file = "/path/to/seed.hex"
//! format = "hex"
//! ```
//!
//! Command-line arguments and their environment variables take precedence over the file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::cli::OutputFormat;

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct TomlConfig {
    /// File holding the seed, used when no seed is given on the command line.
    pub(crate) seed_file: Option<PathBuf>,

    /// Output format used when `--format` is not given.
    pub(crate) format: Option<OutputFormat>,
}

impl TomlConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
