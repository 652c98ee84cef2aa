//! CLI deriving BLS12-381 secret keys from a seed and an EIP-2334 path.

mod cli;
mod config;
mod handlers;
mod seed;

use anyhow::{Error, Result};
use bls_keygen_common::logging::{self, LoggerConfig};
use clap::Parser;

use crate::{
    config::TomlConfig,
    handlers::{derive_key, path},
};

fn main() -> Result<(), Error> {
    logging::init(LoggerConfig::with_base_name("bls-keygen"));

    let cli = cli::Cli::parse();
    let config = match &cli.config {
        Some(path) => TomlConfig::load(path)?,
        None => TomlConfig::default(),
    };

    match cli.command {
        cli::Commands::Derive(args) => derive_key::handle_derive(args, &config),
        cli::Commands::Signing(args) => derive_key::handle_signing(args, &config),
        cli::Commands::Withdrawal(args) => derive_key::handle_withdrawal(args, &config),
        cli::Commands::Path(args) => {
            path::handle_path(args);
            Ok(())
        }
    }
}
