use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(
    name = "bls-keygen",
    about = "Derives BLS12-381 secret keys from a seed (EIP-2333/EIP-2334)",
    version
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "BLS_KEYGEN_CONFIG",
        help = "path to a TOML file with default settings"
    )]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    Derive(DeriveArgs),

    #[command(about = "Derive the signing key of an account, at m/12381/3600/<account>/0/0")]
    Signing(AccountArgs),

    #[command(about = "Derive the withdrawal key of an account, at m/12381/3600/<account>/0")]
    Withdrawal(AccountArgs),

    Path(PathArgs),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Derive the key at an arbitrary path", version)]
pub(crate) struct DeriveArgs {
    #[arg(long, help = "derivation path, e.g. m/12381/3600/0/0/0")]
    pub(crate) path: String,

    #[clap(flatten)]
    pub(crate) seed: SeedArgs,

    #[clap(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct AccountArgs {
    #[arg(long, default_value_t = 0, help = "account index")]
    pub(crate) account: u32,

    #[clap(flatten)]
    pub(crate) seed: SeedArgs,

    #[clap(flatten)]
    pub(crate) output: OutputArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Print the derivation path of an account key", version)]
pub(crate) struct PathArgs {
    #[arg(value_enum, help = "which key of the account")]
    pub(crate) kind: KeyKind,

    #[arg(long, default_value_t = 0, help = "account index")]
    pub(crate) account: u32,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct SeedArgs {
    #[arg(
        long,
        env = "BLS_KEYGEN_SEED",
        hide_env_values = true,
        help = "hex-encoded seed, at least 32 bytes"
    )]
    pub(crate) seed: Option<String>,

    #[arg(
        long,
        env = "BLS_KEYGEN_SEED_FILE",
        help = "file holding the seed as hex text or raw bytes"
    )]
    pub(crate) seed_file: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct OutputArgs {
    #[arg(long, value_enum, help = "how to print the key [default: decimal]")]
    pub(crate) format: Option<OutputFormat>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyKind {
    Signing,
    Withdrawal,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Decimal integer, as in the published test vectors.
    #[default]
    Decimal,

    /// 32-byte big-endian hex.
    Hex,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_subcommand_has_about() {
        let cmd = Cli::command();
        for name in ["derive", "signing", "withdrawal", "path"] {
            let sub = cmd.find_subcommand(name).unwrap();
            assert!(sub.get_about().is_some(), "{name} has no about");
        }
        let signing = cmd.find_subcommand("signing").unwrap();
        assert!(signing
            .get_about()
            .unwrap()
            .to_string()
            .contains("m/12381/3600/<account>/0/0"));
    }

    #[test]
    fn test_parse_derive() {
        let cli = Cli::try_parse_from([
            "bls-keygen",
            "derive",
            "--path",
            "m/12381/3600/0/0/0",
            "--seed",
            "00ff",
            "--format",
            "hex",
        ])
        .unwrap();

        let Commands::Derive(args) = cli.command else {
            panic!("expected derive");
        };
        assert_eq!(args.path, "m/12381/3600/0/0/0");
        assert_eq!(args.seed.seed.as_deref(), Some("00ff"));
        assert_eq!(args.output.format, Some(OutputFormat::Hex));
    }

    #[test]
    fn test_parse_path_kind() {
        let cli =
            Cli::try_parse_from(["bls-keygen", "path", "withdrawal", "--account", "3"]).unwrap();
        let Commands::Path(args) = cli.command else {
            panic!("expected path");
        };
        assert_eq!(args.kind, KeyKind::Withdrawal);
        assert_eq!(args.account, 3);
    }

    #[test]
    fn test_account_must_fit_u32() {
        assert!(Cli::try_parse_from(["bls-keygen", "signing", "--account", "4294967296"]).is_err());
    }
}
