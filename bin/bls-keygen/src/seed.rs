//! Seed loading for the CLI.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use tracing::debug;
use zeroize::Zeroizing;

use crate::{cli::SeedArgs, config::TomlConfig};

/// Loads the seed from, in order of precedence, `--seed`, `--seed-file` or the config file.
///
/// The length is not checked here; the derivation rejects seeds that are too short.
pub(crate) fn load_seed(args: &SeedArgs, config: &TomlConfig) -> Result<Zeroizing<Vec<u8>>> {
    if let Some(seed_hex) = &args.seed {
        return decode_hex(seed_hex).context("invalid hex seed");
    }

    let Some(path) = args.seed_file.as_ref().or(config.seed_file.as_ref()) else {
        bail!("no seed given, use --seed or --seed-file");
    };
    read_seed_file(path)
}

/// Reads a seed file holding either hex text or raw bytes.
///
/// Content that is valid UTF-8 and decodes as hex after trimming is taken as hex, anything else
/// as the raw seed.
fn read_seed_file(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    let raw = Zeroizing::new(
        fs::read(path).with_context(|| format!("failed to read seed file {}", path.display()))?,
    );

    if let Ok(text) = std::str::from_utf8(&raw) {
        if let Ok(seed) = decode_hex(text) {
            debug!(path = %path.display(), "read hex seed file");
            return Ok(seed);
        }
    }

    debug!(path = %path.display(), "read raw seed file");
    Ok(Zeroizing::new(raw.to_vec()))
}

fn decode_hex(s: &str) -> Result<Zeroizing<Vec<u8>>, hex::FromHexError> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map(Zeroizing::new)
}
