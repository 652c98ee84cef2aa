//! Derives a secret key from a seed and prints it.

use anyhow::Result;
use bls_key_deriv::{derive_key_at, DerivationPath, SecretKey};
use tracing::info;

use crate::{
    cli::{AccountArgs, DeriveArgs, OutputArgs, OutputFormat},
    config::TomlConfig,
    seed::load_seed,
};

/// Handles the derive command.
pub(crate) fn handle_derive(args: DeriveArgs, config: &TomlConfig) -> Result<()> {
    let path: DerivationPath = args.path.parse()?;
    let seed = load_seed(&args.seed, config)?;
    print_key(&seed, &path, &args.output, config)
}

/// Handles the signing command.
pub(crate) fn handle_signing(args: AccountArgs, config: &TomlConfig) -> Result<()> {
    let seed = load_seed(&args.seed, config)?;
    print_key(&seed, &DerivationPath::signing(args.account), &args.output, config)
}

/// Handles the withdrawal command.
pub(crate) fn handle_withdrawal(args: AccountArgs, config: &TomlConfig) -> Result<()> {
    let seed = load_seed(&args.seed, config)?;
    print_key(
        &seed,
        &DerivationPath::withdrawal(args.account),
        &args.output,
        config,
    )
}

fn print_key(
    seed: &[u8],
    path: &DerivationPath,
    output: &OutputArgs,
    config: &TomlConfig,
) -> Result<()> {
    info!(%path, "deriving key");
    let key = derive_key_at(seed, path)?;

    let format = output.format.or(config.format).unwrap_or_default();
    println!("{}", render_key(&key, format));

    Ok(())
}

fn render_key(key: &SecretKey, format: OutputFormat) -> String {
    match format {
        OutputFormat::Decimal => key.to_decimal_string(),
        OutputFormat::Hex => hex::encode(key.to_be_bytes()),
    }
}
